use std::collections::BTreeMap;

use serde::Serialize;

use super::catalog::{Category, OptionLetter, Question, QuestionId, MAX_POINT_VALUE};

/// Stateless rule turning option selections into points and points into a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringRule {
    max_point_value: u8,
}

impl Default for ScoringRule {
    fn default() -> Self {
        Self {
            max_point_value: MAX_POINT_VALUE,
        }
    }
}

impl ScoringRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn max_point_value(&self) -> u8 {
        self.max_point_value
    }

    /// Catalog point value for `option`; absent options are never scoreable.
    pub fn score(&self, question: &Question, option: OptionLetter) -> Result<u8, ScoringError> {
        question
            .option(option)
            .map(|choice| choice.points)
            .ok_or(ScoringError::InvalidSelection {
                question_id: question.id,
                option,
            })
    }

    /// `round_half_up(100 * sum / (len * max))` over the per-answer points.
    pub fn aggregate<I>(&self, points: I) -> Result<u8, ScoringError>
    where
        I: IntoIterator<Item = u8>,
    {
        let (sum, count) = points
            .into_iter()
            .fold((0u64, 0u64), |(sum, count), value| {
                (sum + u64::from(value), count + 1)
            });

        if count == 0 {
            return Err(ScoringError::EmptyEvaluation);
        }

        Ok(percent(sum, count * u64::from(self.max_point_value)))
    }

    /// Same normalization as [`ScoringRule::aggregate`], applied per category.
    pub fn category_breakdown<'a, I>(&self, scored: I) -> Vec<CategoryScore>
    where
        I: IntoIterator<Item = (&'a Question, u8)>,
    {
        let mut totals: BTreeMap<Category, (u64, u64)> = BTreeMap::new();
        for (question, points) in scored {
            let entry = totals.entry(question.category).or_default();
            entry.0 += u64::from(points);
            entry.1 += 1;
        }

        totals
            .into_iter()
            .map(|(category, (sum, count))| CategoryScore {
                category,
                category_label: category.label(),
                answered: count as usize,
                percent: percent(sum, count * u64::from(self.max_point_value)),
            })
            .collect()
    }
}

/// Integer round-half-up of `100 * numerator / denominator`, clamped to 100.
fn percent(numerator: u64, denominator: u64) -> u8 {
    if denominator == 0 {
        return 0;
    }
    let scaled = (200 * numerator + denominator) / (2 * denominator);
    scaled.min(100) as u8
}

/// Normalized score for one category of a single evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryScore {
    pub category: Category,
    pub category_label: &'static str,
    pub answered: usize,
    pub percent: u8,
}

/// Failures on the scoring path. None of them default to zero points.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("option {option} is not available for question {question_id}")]
    InvalidSelection {
        question_id: QuestionId,
        option: OptionLetter,
    },
    #[error("an evaluation must contain at least one answer")]
    EmptyEvaluation,
}
