use std::collections::BTreeSet;

use chrono::NaiveDateTime;

use super::domain::{
    Answer, AnswerSelection, Evaluation, EvaluationDraft, EvaluationMetadata, CONFIDENCE_RANGE,
};
use super::service::EvaluationError;
use crate::welfare::animals::AnimalId;
use crate::welfare::catalog::{QuestionCatalog, QuestionId};
use crate::welfare::scoring::{ScoringError, ScoringRule};

/// Pure consistency boundary for one evaluation: validates the submission against the
/// catalog, freezes per-answer points and derives the overall score. Never touches a store.
pub struct EvaluationAssembler<'a> {
    catalog: &'a QuestionCatalog,
    rule: ScoringRule,
}

impl<'a> EvaluationAssembler<'a> {
    pub fn new(catalog: &'a QuestionCatalog) -> Self {
        Self {
            catalog,
            rule: ScoringRule::new(),
        }
    }

    pub fn assemble(
        &self,
        animal_id: AnimalId,
        metadata: EvaluationMetadata,
        selections: Vec<AnswerSelection>,
        fallback_timestamp: NaiveDateTime,
    ) -> Result<EvaluationDraft, EvaluationError> {
        validate_metadata(&metadata)?;

        if selections.is_empty() {
            return Err(ScoringError::EmptyEvaluation.into());
        }

        let mut seen = BTreeSet::new();
        for selection in &selections {
            if self.catalog.get(selection.question_id).is_none() {
                return Err(EvaluationError::UnknownQuestion(selection.question_id));
            }
            if !seen.insert(selection.question_id) {
                return Err(EvaluationError::DuplicateAnswer(selection.question_id));
            }
        }

        let missing: Vec<QuestionId> = self
            .catalog
            .questions()
            .iter()
            .map(|question| question.id)
            .filter(|id| !seen.contains(id))
            .collect();
        if !missing.is_empty() {
            return Err(EvaluationError::IncompleteEvaluation { missing });
        }

        let mut answers = Vec::with_capacity(selections.len());
        for selection in selections {
            let question = self
                .catalog
                .get(selection.question_id)
                .ok_or(EvaluationError::UnknownQuestion(selection.question_id))?;
            let points = self.rule.score(question, selection.option)?;
            answers.push(Answer::scored(selection, points));
        }

        let overall_score = self.rule.aggregate(answers.iter().map(Answer::points))?;
        let timestamp = metadata.timestamp.unwrap_or(fallback_timestamp);

        Ok(EvaluationDraft::new(
            animal_id,
            timestamp,
            metadata,
            answers,
            overall_score,
        ))
    }

    /// Re-derives points and score for an evaluation read back from storage. Every answer
    /// must name a catalog question once, carry that option's catalog points, and the
    /// stored score must equal the aggregate of those points.
    pub fn verify(&self, evaluation: &Evaluation) -> Result<(), EvaluationError> {
        let mut seen = BTreeSet::new();
        for answer in evaluation.answers() {
            let question = self
                .catalog
                .get(answer.question_id())
                .ok_or(EvaluationError::UnknownQuestion(answer.question_id()))?;
            if !seen.insert(answer.question_id()) {
                return Err(EvaluationError::DuplicateAnswer(answer.question_id()));
            }

            let expected = self.rule.score(question, answer.selected_option())?;
            if answer.points() != expected {
                return Err(EvaluationError::PointsMismatch {
                    question_id: answer.question_id(),
                    stored: answer.points(),
                    expected,
                });
            }
        }

        let expected = self
            .rule
            .aggregate(evaluation.answers().iter().map(Answer::points))?;
        if evaluation.overall_score() != expected {
            return Err(EvaluationError::ScoreMismatch {
                stored: evaluation.overall_score(),
                expected,
            });
        }
        Ok(())
    }
}

fn validate_metadata(metadata: &EvaluationMetadata) -> Result<(), EvaluationError> {
    if !CONFIDENCE_RANGE.contains(&metadata.confidence_level) {
        return Err(EvaluationError::OutOfRange {
            field: "confidence_level",
            value: metadata.confidence_level,
        });
    }

    if metadata.evaluator_name.trim().is_empty() {
        return Err(EvaluationError::MissingField("evaluator_name"));
    }

    if let (Some(started_at), Some(ended_at)) = (metadata.started_at, metadata.ended_at) {
        if started_at > ended_at {
            return Err(EvaluationError::SessionOutOfOrder {
                started_at,
                ended_at,
            });
        }
    }

    Ok(())
}
