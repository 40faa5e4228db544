pub mod animals;
pub mod bootstrap;
pub mod catalog;
pub mod evaluations;
pub mod export;
pub mod report;
pub mod repository;
pub mod scoring;
pub mod simulation;

pub use bootstrap::{BootstrapError, BootstrapPhase, BootstrapReport, Bootstrapper};
pub use catalog::{Category, OptionLetter, Question, QuestionCatalog, QuestionId};
pub use repository::{AnimalRepository, EvaluationRepository, QuestionRepository, RepositoryError};
pub use scoring::{CategoryScore, ScoringError, ScoringRule};
