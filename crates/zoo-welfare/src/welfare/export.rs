use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::Serialize;

use super::animals::AnimalId;
use super::catalog::{OptionLetter, QuestionId};
use super::evaluations::{Evaluation, EvaluationId};

pub const EVALUATIONS_FILE: &str = "evaluations.csv";
pub const ANSWERS_FILE: &str = "answers.csv";

#[derive(Debug, Serialize)]
struct EvaluationRow<'a> {
    id: EvaluationId,
    animal_id: AnimalId,
    timestamp: NaiveDateTime,
    started_at: Option<NaiveDateTime>,
    ended_at: Option<NaiveDateTime>,
    location: &'a str,
    evaluator: &'a str,
    role: &'a str,
    confidence: u8,
    score: u8,
    notes: &'a str,
    photo_urls: String,
}

#[derive(Debug, Serialize)]
struct AnswerRow<'a> {
    /// `<evaluation_id>-<position>`, 1-based; stable for as long as the evaluation is.
    id: String,
    evaluation_id: EvaluationId,
    question_id: QuestionId,
    selection: OptionLetter,
    points: u8,
    comment: Option<&'a str>,
}

/// One row per evaluation, in identifier order. Returns the number of rows written.
pub fn write_evaluations<W: Write>(
    writer: W,
    evaluations: &[Evaluation],
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut ordered: Vec<&Evaluation> = evaluations.iter().collect();
    ordered.sort_by_key(|evaluation| evaluation.id());

    for evaluation in &ordered {
        csv_writer.serialize(EvaluationRow {
            id: evaluation.id(),
            animal_id: evaluation.animal_id(),
            timestamp: evaluation.timestamp(),
            started_at: evaluation.started_at(),
            ended_at: evaluation.ended_at(),
            location: evaluation.location(),
            evaluator: evaluation.evaluator_name(),
            role: evaluation.evaluator_role(),
            confidence: evaluation.confidence_level(),
            score: evaluation.overall_score(),
            notes: evaluation.notes(),
            photo_urls: evaluation.photo_urls_joined(),
        })?;
    }
    csv_writer.flush()?;
    Ok(ordered.len())
}

/// One row per answer, grouped by evaluation and kept in submission order.
pub fn write_answers<W: Write>(
    writer: W,
    evaluations: &[Evaluation],
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut ordered: Vec<&Evaluation> = evaluations.iter().collect();
    ordered.sort_by_key(|evaluation| evaluation.id());

    let mut rows = 0;
    for evaluation in ordered {
        for (position, answer) in evaluation.answers().iter().enumerate() {
            csv_writer.serialize(AnswerRow {
                id: format!("{}-{}", evaluation.id(), position + 1),
                evaluation_id: evaluation.id(),
                question_id: answer.question_id(),
                selection: answer.selected_option(),
                points: answer.points(),
                comment: answer.comment(),
            })?;
            rows += 1;
        }
    }
    csv_writer.flush()?;
    Ok(rows)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub evaluations_path: PathBuf,
    pub answers_path: PathBuf,
    pub evaluations: usize,
    pub answers: usize,
}

/// Writes both tables into `directory`, creating it when missing.
pub fn export_to_dir<P: AsRef<Path>>(
    directory: P,
    evaluations: &[Evaluation],
) -> Result<ExportSummary, ExportError> {
    let directory = directory.as_ref();
    fs::create_dir_all(directory)?;

    let evaluations_path = directory.join(EVALUATIONS_FILE);
    let answers_path = directory.join(ANSWERS_FILE);
    let evaluation_rows = write_evaluations(File::create(&evaluations_path)?, evaluations)?;
    let answer_rows = write_answers(File::create(&answers_path)?, evaluations)?;

    Ok(ExportSummary {
        evaluations_path,
        answers_path,
        evaluations: evaluation_rows,
        answers: answer_rows,
    })
}

#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Io(err) => write!(f, "failed to write export file: {}", err),
            ExportError::Csv(err) => write!(f, "failed to encode export rows: {}", err),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Io(err) => Some(err),
            ExportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}
