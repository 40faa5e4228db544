use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::welfare::animals::AnimalId;
use crate::welfare::catalog::{OptionLetter, QuestionId};

/// Lowest and highest confidence an evaluator may report.
pub const CONFIDENCE_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// Identifier wrapper for stored evaluations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EvaluationId(pub u64);

impl fmt::Display for EvaluationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Session details supplied by the evaluator. `timestamp` falls back to the clock (on
/// create) or the stored value (on update) when absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EvaluationMetadata {
    pub timestamp: Option<NaiveDateTime>,
    pub started_at: Option<NaiveDateTime>,
    pub ended_at: Option<NaiveDateTime>,
    pub location: String,
    pub evaluator_name: String,
    pub evaluator_role: String,
    pub confidence_level: u8,
    pub notes: String,
    pub photo_urls: Vec<String>,
}

/// One option chosen for one catalog question. Carries no points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSelection {
    pub question_id: QuestionId,
    pub option: OptionLetter,
    pub comment: Option<String>,
}

impl AnswerSelection {
    pub fn new(question_id: QuestionId, option: OptionLetter) -> Self {
        Self {
            question_id,
            option,
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// Scored answer. Points are frozen from the catalog when the evaluation is assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    question_id: QuestionId,
    selected_option: OptionLetter,
    points: u8,
    comment: Option<String>,
}

impl Answer {
    pub(super) fn scored(selection: AnswerSelection, points: u8) -> Self {
        Self {
            question_id: selection.question_id,
            selected_option: selection.option,
            points,
            comment: selection.comment,
        }
    }

    pub fn question_id(&self) -> QuestionId {
        self.question_id
    }

    pub fn selected_option(&self) -> OptionLetter {
        self.selected_option
    }

    pub fn points(&self) -> u8 {
        self.points
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }
}

/// Validated and scored evaluation awaiting an identifier from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationDraft {
    animal_id: AnimalId,
    timestamp: NaiveDateTime,
    started_at: Option<NaiveDateTime>,
    ended_at: Option<NaiveDateTime>,
    location: String,
    evaluator_name: String,
    evaluator_role: String,
    confidence_level: u8,
    notes: String,
    photo_urls: Vec<String>,
    answers: Vec<Answer>,
    overall_score: u8,
}

impl EvaluationDraft {
    pub(super) fn new(
        animal_id: AnimalId,
        timestamp: NaiveDateTime,
        metadata: EvaluationMetadata,
        answers: Vec<Answer>,
        overall_score: u8,
    ) -> Self {
        Self {
            animal_id,
            timestamp,
            started_at: metadata.started_at,
            ended_at: metadata.ended_at,
            location: metadata.location,
            evaluator_name: metadata.evaluator_name,
            evaluator_role: metadata.evaluator_role,
            confidence_level: metadata.confidence_level,
            notes: metadata.notes,
            photo_urls: metadata.photo_urls,
            answers,
            overall_score,
        }
    }

    pub fn animal_id(&self) -> AnimalId {
        self.animal_id
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn overall_score(&self) -> u8 {
        self.overall_score
    }

    /// Points a draft scored ahead of the animal's insertion at the stored animal.
    pub(crate) fn reassigned_to(mut self, animal_id: AnimalId) -> Self {
        self.animal_id = animal_id;
        self
    }

    pub fn into_evaluation(self, id: EvaluationId) -> Evaluation {
        Evaluation { id, content: self }
    }
}

/// Persisted evaluation aggregate: session details, ordered answers and the derived score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    id: EvaluationId,
    #[serde(flatten)]
    content: EvaluationDraft,
}

impl Evaluation {
    pub fn id(&self) -> EvaluationId {
        self.id
    }

    pub fn animal_id(&self) -> AnimalId {
        self.content.animal_id
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.content.timestamp
    }

    pub fn started_at(&self) -> Option<NaiveDateTime> {
        self.content.started_at
    }

    pub fn ended_at(&self) -> Option<NaiveDateTime> {
        self.content.ended_at
    }

    pub fn location(&self) -> &str {
        &self.content.location
    }

    pub fn evaluator_name(&self) -> &str {
        &self.content.evaluator_name
    }

    pub fn evaluator_role(&self) -> &str {
        &self.content.evaluator_role
    }

    pub fn confidence_level(&self) -> u8 {
        self.content.confidence_level
    }

    pub fn notes(&self) -> &str {
        &self.content.notes
    }

    pub fn photo_urls(&self) -> &[String] {
        &self.content.photo_urls
    }

    /// Comma-joined form used by the flat export rows.
    pub fn photo_urls_joined(&self) -> String {
        self.content.photo_urls.join(",")
    }

    pub fn answers(&self) -> &[Answer] {
        &self.content.answers
    }

    pub fn overall_score(&self) -> u8 {
        self.content.overall_score
    }

    /// Swaps in freshly assembled content; the id is kept.
    pub fn replaced_with(self, content: EvaluationDraft) -> Self {
        Self {
            id: self.id,
            content,
        }
    }
}
