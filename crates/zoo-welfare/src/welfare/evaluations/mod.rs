//! Evaluation aggregate: one assessment session, its scored answers and the derived
//! overall score, validated and persisted as a single unit.

pub mod aggregate;
pub mod domain;
pub mod service;

#[cfg(test)]
mod tests;

pub use aggregate::EvaluationAssembler;
pub use domain::{
    Answer, AnswerSelection, Evaluation, EvaluationDraft, EvaluationId, EvaluationMetadata,
    CONFIDENCE_RANGE,
};
pub use service::{EvaluationError, EvaluationErrorKind, EvaluationService};
