use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Highest point value any catalog option may carry.
pub const MAX_POINT_VALUE: u8 = 5;

/// Fewest selectable options a question must expose.
pub const MIN_USABLE_OPTIONS: usize = 2;

/// Identifier wrapper for catalog questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct QuestionId(pub u32);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Welfare domain a question belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Nutrition,
    Housing,
    Health,
    Behavior,
    MentalState,
}

impl Category {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Nutrition,
            Self::Housing,
            Self::Health,
            Self::Behavior,
            Self::MentalState,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Nutrition => "Nutrition",
            Self::Housing => "Housing",
            Self::Health => "Health",
            Self::Behavior => "Behavior",
            Self::MentalState => "Mental State",
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Nutrition => "NUTRITION",
            Self::Housing => "HOUSING",
            Self::Health => "HEALTH",
            Self::Behavior => "BEHAVIOR",
            Self::MentalState => "MENTAL_STATE",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_uppercase().replace([' ', '-'], "_");
        Self::ordered()
            .into_iter()
            .find(|category| category.code() == normalized)
            .ok_or_else(|| format!("unknown category '{value}'"))
    }
}

/// Letter under which an option is presented to the evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OptionLetter {
    A,
    B,
    C,
    D,
    E,
}

impl OptionLetter {
    pub const fn ordered() -> [Self; 5] {
        [Self::A, Self::B, Self::C, Self::D, Self::E]
    }

    pub const fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
        }
    }
}

impl fmt::Display for OptionLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for OptionLetter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            "E" => Ok(Self::E),
            other => Err(format!("'{other}' is not an option letter (A-E)")),
        }
    }
}

/// Labeled choice with its point value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub label: String,
    pub points: u8,
}

/// Question content before the store assigns an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub text: String,
    pub category: Category,
    pub options: BTreeMap<OptionLetter, AnswerOption>,
}

impl QuestionDraft {
    pub fn into_question(self, id: QuestionId) -> Question {
        Question {
            id,
            text: self.text,
            category: self.category,
            options: self.options,
        }
    }
}

/// Catalog entry; immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub category: Category,
    pub options: BTreeMap<OptionLetter, AnswerOption>,
}

impl Question {
    pub fn option(&self, letter: OptionLetter) -> Option<&AnswerOption> {
        self.options.get(&letter)
    }

    /// Available options ordered from most to fewest points; ties keep letter order.
    pub fn options_by_points(&self) -> Vec<(OptionLetter, &AnswerOption)> {
        let mut ranked: Vec<_> = self
            .options
            .iter()
            .map(|(letter, option)| (*letter, option))
            .collect();
        ranked.sort_by(|left, right| right.1.points.cmp(&left.1.points).then(left.0.cmp(&right.0)));
        ranked
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.options.len() < MIN_USABLE_OPTIONS {
            return Err(CatalogError::TooFewOptions {
                question_id: self.id,
                available: self.options.len(),
            });
        }

        if let Some((letter, option)) = self
            .options
            .iter()
            .find(|(_, option)| option.points > MAX_POINT_VALUE)
        {
            return Err(CatalogError::PointsOutOfRange {
                question_id: self.id,
                option: *letter,
                points: option.points,
            });
        }

        Ok(())
    }
}

/// Failures raised while loading or seeding the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("question {question_id} exposes {available} option(s); at least 2 are required")]
    TooFewOptions {
        question_id: QuestionId,
        available: usize,
    },
    #[error("question {question_id} option {option} awards {points} points; maximum is 5")]
    PointsOutOfRange {
        question_id: QuestionId,
        option: OptionLetter,
        points: u8,
    },
}
