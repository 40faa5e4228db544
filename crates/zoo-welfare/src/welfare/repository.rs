use super::animals::{Animal, AnimalDraft, AnimalId};
use super::catalog::{Question, QuestionDraft};
use super::evaluations::{Evaluation, EvaluationDraft, EvaluationId};

/// Storage for the shared question catalog.
pub trait QuestionRepository: Send + Sync {
    fn count(&self) -> Result<usize, RepositoryError>;
    /// Assigns identifiers in input order. Implementations reject inserts into a non-empty
    /// catalog with `Conflict`.
    fn insert_all(&self, drafts: Vec<QuestionDraft>) -> Result<Vec<Question>, RepositoryError>;
    /// All questions ordered by identifier.
    fn all(&self) -> Result<Vec<Question>, RepositoryError>;
}

/// Storage for animals. Deleting an animal removes its evaluations in the same operation.
pub trait AnimalRepository: Send + Sync {
    fn count(&self) -> Result<usize, RepositoryError>;
    fn insert(&self, draft: AnimalDraft) -> Result<Animal, RepositoryError>;
    /// Inserts a whole roster in one step. Implementations reject the batch with `Conflict`
    /// when any animal already exists, so concurrent seeders cannot both populate the store.
    fn insert_all(&self, drafts: Vec<AnimalDraft>) -> Result<Vec<Animal>, RepositoryError>;
    fn fetch(&self, id: AnimalId) -> Result<Option<Animal>, RepositoryError>;
    fn all(&self) -> Result<Vec<Animal>, RepositoryError>;
    fn delete(&self, id: AnimalId) -> Result<(), RepositoryError>;
}

/// Storage for evaluation aggregates. An evaluation and its answers are always written and
/// removed as one unit.
pub trait EvaluationRepository: Send + Sync {
    fn count(&self) -> Result<usize, RepositoryError>;
    fn insert(&self, draft: EvaluationDraft) -> Result<Evaluation, RepositoryError>;
    fn replace(&self, evaluation: Evaluation) -> Result<(), RepositoryError>;
    fn fetch(&self, id: EvaluationId) -> Result<Option<Evaluation>, RepositoryError>;
    /// Evaluations of one animal, newest first.
    fn for_animal(&self, animal_id: AnimalId) -> Result<Vec<Evaluation>, RepositoryError>;
    fn all(&self) -> Result<Vec<Evaluation>, RepositoryError>;
    fn delete(&self, id: EvaluationId) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
