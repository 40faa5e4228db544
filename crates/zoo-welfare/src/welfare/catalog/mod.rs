//! The shared welfare questionnaire: one canonical set of questions, seeded once per store
//! and never rewritten afterwards so historical answers keep pointing at the same content.

mod domain;
mod standard;

pub use domain::{
    AnswerOption, Category, CatalogError, OptionLetter, Question, QuestionDraft, QuestionId,
    MAX_POINT_VALUE, MIN_USABLE_OPTIONS,
};

use std::collections::BTreeMap;

use tracing::{debug, info};

use super::repository::{QuestionRepository, RepositoryError};

/// Result of the idempotent catalog seeding step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSeedOutcome {
    Seeded { questions: usize },
    AlreadyPresent { questions: usize },
}

/// Read-only view over the loaded catalog, ordered by question id.
#[derive(Debug, Clone, Default)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
    index: BTreeMap<QuestionId, usize>,
}

impl QuestionCatalog {
    /// Fills an empty store with the standard catalog; leaves a populated store untouched.
    pub fn seed<R>(repository: &R) -> Result<CatalogSeedOutcome, CatalogLoadError>
    where
        R: QuestionRepository + ?Sized,
    {
        let existing = repository.count()?;
        if existing > 0 {
            debug!(questions = existing, "catalog already present; skipping seed");
            return Ok(CatalogSeedOutcome::AlreadyPresent {
                questions: existing,
            });
        }

        match repository.insert_all(standard::standard_question_drafts()) {
            Ok(stored) => {
                info!(questions = stored.len(), "seeded welfare question catalog");
                Ok(CatalogSeedOutcome::Seeded {
                    questions: stored.len(),
                })
            }
            // Another bootstrap won the race between the count and the insert.
            Err(RepositoryError::Conflict) => Ok(CatalogSeedOutcome::AlreadyPresent {
                questions: repository.count()?,
            }),
            Err(err) => Err(err.into()),
        }
    }

    /// Loads and validates every stored question.
    pub fn load<R>(repository: &R) -> Result<Self, CatalogLoadError>
    where
        R: QuestionRepository + ?Sized,
    {
        let mut questions = repository.all()?;
        questions.sort_by_key(|question| question.id);
        Ok(Self::from_questions(questions)?)
    }

    pub fn from_questions(questions: Vec<Question>) -> Result<Self, CatalogError> {
        for question in &questions {
            question.validate()?;
        }
        Ok(Self::indexed(questions))
    }

    /// The standard catalog with ids assigned 1..=n, without touching a store.
    pub fn standard() -> Self {
        let questions = standard::standard_question_drafts()
            .into_iter()
            .enumerate()
            .map(|(position, draft)| draft.into_question(QuestionId(position as u32 + 1)))
            .collect();
        Self::indexed(questions)
    }

    fn indexed(questions: Vec<Question>) -> Self {
        let index = questions
            .iter()
            .enumerate()
            .map(|(position, question)| (question.id, position))
            .collect();
        Self { questions, index }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        self.index
            .get(&id)
            .and_then(|position| self.questions.get(*position))
    }

    pub fn in_category(&self, category: Category) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|question| question.category == category)
            .collect()
    }

    /// Categories that have at least one question, in display order.
    pub fn categories(&self) -> Vec<Category> {
        Category::ordered()
            .into_iter()
            .filter(|category| self.questions.iter().any(|q| q.category == *category))
            .collect()
    }

    pub const fn max_point_value(&self) -> u8 {
        MAX_POINT_VALUE
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogLoadError {
    #[error(transparent)]
    Invalid(#[from] CatalogError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn seeding_twice_keeps_the_original_catalog() {
        let store = MemoryStore::default();

        let first = QuestionCatalog::seed(&store).expect("first seed");
        assert_eq!(first, CatalogSeedOutcome::Seeded { questions: 30 });
        let before = QuestionRepository::all(&store).expect("questions");

        let second = QuestionCatalog::seed(&store).expect("second seed");
        assert_eq!(second, CatalogSeedOutcome::AlreadyPresent { questions: 30 });
        let after = QuestionRepository::all(&store).expect("questions");

        assert_eq!(before, after);
    }

    #[test]
    fn load_orders_questions_and_indexes_them() {
        let store = MemoryStore::default();
        QuestionCatalog::seed(&store).expect("seed");

        let catalog = QuestionCatalog::load(&store).expect("load");
        assert_eq!(catalog.len(), 30);
        assert_eq!(catalog.max_point_value(), 5);
        assert!(catalog
            .questions()
            .windows(2)
            .all(|pair| pair[0].id < pair[1].id));

        let first = catalog.questions()[0].clone();
        assert_eq!(catalog.get(first.id), Some(&first));
        assert!(catalog.get(QuestionId(999)).is_none());
        assert_eq!(catalog.in_category(Category::MentalState).len(), 6);
        assert_eq!(catalog.categories(), Category::ordered().to_vec());
    }

    #[test]
    fn load_rejects_questions_with_a_single_option() {
        let mut options = BTreeMap::new();
        options.insert(
            OptionLetter::A,
            AnswerOption {
                label: "Yes".to_string(),
                points: 5,
            },
        );
        let question = Question {
            id: QuestionId(1),
            text: "Single choice".to_string(),
            category: Category::Health,
            options,
        };

        match QuestionCatalog::from_questions(vec![question]) {
            Err(CatalogError::TooFewOptions {
                question_id,
                available,
            }) => {
                assert_eq!(question_id, QuestionId(1));
                assert_eq!(available, 1);
            }
            other => panic!("expected too few options, got {other:?}"),
        }
    }

    #[test]
    fn load_rejects_points_above_the_maximum() {
        let mut options = BTreeMap::new();
        options.insert(
            OptionLetter::A,
            AnswerOption {
                label: "Yes".to_string(),
                points: 7,
            },
        );
        options.insert(
            OptionLetter::E,
            AnswerOption {
                label: "No".to_string(),
                points: 1,
            },
        );
        let question = Question {
            id: QuestionId(4),
            text: "Over scaled".to_string(),
            category: Category::Nutrition,
            options,
        };

        assert!(matches!(
            QuestionCatalog::from_questions(vec![question]),
            Err(CatalogError::PointsOutOfRange { points: 7, .. })
        ));
    }

    #[test]
    fn empty_store_loads_an_empty_catalog() {
        let store = MemoryStore::default();
        let catalog = QuestionCatalog::load(&store).expect("load");
        assert!(catalog.is_empty());
    }
}
