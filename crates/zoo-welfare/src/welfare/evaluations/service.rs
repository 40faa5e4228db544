use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{debug, info};

use super::aggregate::EvaluationAssembler;
use super::domain::{AnswerSelection, Evaluation, EvaluationId, EvaluationMetadata};
use crate::clock::Clock;
use crate::welfare::animals::AnimalId;
use crate::welfare::catalog::{QuestionCatalog, QuestionId};
use crate::welfare::repository::{AnimalRepository, EvaluationRepository, RepositoryError};
use crate::welfare::scoring::ScoringError;

/// Service composing the catalog, the scoring assembler and the repositories.
pub struct EvaluationService<A, E, C> {
    catalog: Arc<QuestionCatalog>,
    animals: Arc<A>,
    evaluations: Arc<E>,
    clock: Arc<C>,
}

impl<A, E, C> EvaluationService<A, E, C>
where
    A: AnimalRepository + 'static,
    E: EvaluationRepository + 'static,
    C: Clock + 'static,
{
    pub fn new(
        catalog: Arc<QuestionCatalog>,
        animals: Arc<A>,
        evaluations: Arc<E>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            catalog,
            animals,
            evaluations,
            clock,
        }
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    /// Validate, score and persist a complete submission as one unit.
    pub fn create(
        &self,
        animal_id: AnimalId,
        metadata: EvaluationMetadata,
        selections: Vec<AnswerSelection>,
    ) -> Result<Evaluation, EvaluationError> {
        let assembler = EvaluationAssembler::new(&self.catalog);
        let draft = assembler.assemble(animal_id, metadata, selections, self.clock.now())?;

        if self.animals.fetch(animal_id)?.is_none() {
            return Err(EvaluationError::AnimalNotFound(animal_id));
        }

        let stored = self.evaluations.insert(draft)?;
        info!(
            evaluation_id = %stored.id(),
            animal_id = %animal_id,
            score = stored.overall_score(),
            answers = stored.answers().len(),
            "recorded welfare evaluation"
        );
        Ok(stored)
    }

    /// Re-run validation and scoring, then replace the stored aggregate in place.
    pub fn update(
        &self,
        evaluation_id: EvaluationId,
        metadata: EvaluationMetadata,
        selections: Vec<AnswerSelection>,
    ) -> Result<Evaluation, EvaluationError> {
        let existing = self.get(evaluation_id)?;
        let assembler = EvaluationAssembler::new(&self.catalog);
        let draft = assembler.assemble(
            existing.animal_id(),
            metadata,
            selections,
            existing.timestamp(),
        )?;

        let updated = existing.replaced_with(draft);
        self.evaluations
            .replace(updated.clone())
            .map_err(|err| match err {
                RepositoryError::NotFound => EvaluationError::NotFound(evaluation_id),
                other => other.into(),
            })?;

        info!(
            evaluation_id = %evaluation_id,
            score = updated.overall_score(),
            "updated welfare evaluation"
        );
        Ok(updated)
    }

    /// Remove an evaluation together with its answers.
    pub fn delete(&self, evaluation_id: EvaluationId) -> Result<(), EvaluationError> {
        match self.evaluations.delete(evaluation_id) {
            Ok(()) => {
                info!(evaluation_id = %evaluation_id, "deleted welfare evaluation");
                Ok(())
            }
            Err(RepositoryError::NotFound) => Err(EvaluationError::NotFound(evaluation_id)),
            Err(err) => Err(err.into()),
        }
    }

    pub fn get(&self, evaluation_id: EvaluationId) -> Result<Evaluation, EvaluationError> {
        self.evaluations
            .fetch(evaluation_id)?
            .ok_or(EvaluationError::NotFound(evaluation_id))
    }

    pub fn list(&self) -> Result<Vec<Evaluation>, EvaluationError> {
        Ok(self.evaluations.all()?)
    }

    /// Evaluations of one animal, newest first.
    pub fn for_animal(&self, animal_id: AnimalId) -> Result<Vec<Evaluation>, EvaluationError> {
        if self.animals.fetch(animal_id)?.is_none() {
            return Err(EvaluationError::AnimalNotFound(animal_id));
        }
        let history = self.evaluations.for_animal(animal_id)?;
        debug!(animal_id = %animal_id, evaluations = history.len(), "loaded evaluation history");
        Ok(history)
    }
}

/// Coarse classification of [`EvaluationError`] for callers that only branch on the family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationErrorKind {
    Validation,
    NotFound,
    Persistence,
}

#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error("{field} must be within 1..=5, got {value}")]
    OutOfRange { field: &'static str, value: u8 },
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("session starts at {started_at} but ends earlier at {ended_at}")]
    SessionOutOfOrder {
        started_at: NaiveDateTime,
        ended_at: NaiveDateTime,
    },
    #[error("question {0} is not part of the catalog")]
    UnknownQuestion(QuestionId),
    #[error("question {0} was answered more than once")]
    DuplicateAnswer(QuestionId),
    #[error("evaluation is incomplete; unanswered questions: {}", join_ids(.missing))]
    IncompleteEvaluation { missing: Vec<QuestionId> },
    #[error("question {question_id} stores {stored} points but the catalog awards {expected}")]
    PointsMismatch {
        question_id: QuestionId,
        stored: u8,
        expected: u8,
    },
    #[error("stored score {stored} does not match the recomputed score {expected}")]
    ScoreMismatch { stored: u8, expected: u8 },
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error("animal {0} not found")]
    AnimalNotFound(AnimalId),
    #[error("evaluation {0} not found")]
    NotFound(EvaluationId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl EvaluationError {
    pub fn kind(&self) -> EvaluationErrorKind {
        match self {
            Self::AnimalNotFound(_) | Self::NotFound(_) => EvaluationErrorKind::NotFound,
            Self::Repository(RepositoryError::NotFound) => EvaluationErrorKind::NotFound,
            Self::Repository(_) => EvaluationErrorKind::Persistence,
            _ => EvaluationErrorKind::Validation,
        }
    }
}

fn join_ids(ids: &[QuestionId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
