use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use tracing::debug;
use zoo_welfare::error::AppError;
use zoo_welfare::random::SeededRandom;
use zoo_welfare::store::{MemoryStore, StoreSnapshot};
use zoo_welfare::welfare::animals::OwnerRole;
use zoo_welfare::welfare::catalog::{Category, OptionLetter, QuestionId};
use zoo_welfare::welfare::evaluations::AnswerSelection;

/// Opens the snapshot at `path`, or an empty store when the file does not exist yet.
pub(crate) fn load_store(path: &Path) -> Result<MemoryStore, AppError> {
    if !path.exists() {
        debug!(path = %path.display(), "no snapshot yet; starting from an empty store");
        return Ok(MemoryStore::default());
    }

    let reader = BufReader::new(File::open(path)?);
    let snapshot: StoreSnapshot = serde_json::from_reader(reader)?;
    Ok(MemoryStore::from_snapshot(snapshot)?)
}

/// Writes the snapshot beside `path` first and renames it into place.
pub(crate) fn save_store(store: &MemoryStore, path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let snapshot = store.snapshot()?;
    let staging = path.with_extension("tmp");
    let mut writer = BufWriter::new(File::create(&staging)?);
    serde_json::to_writer_pretty(&mut writer, &snapshot)?;
    writer.flush()?;
    drop(writer);
    fs::rename(&staging, path)?;

    debug!(
        path = %path.display(),
        animals = snapshot.animals.len(),
        evaluations = snapshot.evaluations.len(),
        "saved store snapshot"
    );
    Ok(())
}

pub(crate) fn random_source(seed: Option<u64>) -> SeededRandom {
    match seed {
        Some(seed) => SeededRandom::from_seed(seed),
        None => SeededRandom::from_entropy(),
    }
}

pub(crate) fn parse_category(raw: &str) -> Result<Category, String> {
    Category::from_str(raw)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| format!("'{raw}' is not a date (expected YYYY-MM-DD)"))
}

pub(crate) fn parse_owner_role(raw: &str) -> Result<OwnerRole, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "admin" => Ok(OwnerRole::Admin),
        "caretaker" => Ok(OwnerRole::Caretaker),
        _ => Err(format!("unknown owner role '{raw}' (admin or caretaker)")),
    }
}

/// Answer selections given on the command line.
#[derive(Debug, Clone)]
pub(crate) struct AnswerList(pub(crate) Vec<AnswerSelection>);

pub(crate) fn parse_answer_list(raw: &str) -> Result<AnswerList, String> {
    parse_answers(raw).map(AnswerList)
}

/// Parses `"1=A, 2=c,3=B"` into selections, keeping input order.
pub(crate) fn parse_answers(raw: &str) -> Result<Vec<AnswerSelection>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (id, letter) = pair
                .split_once('=')
                .ok_or_else(|| format!("expected QUESTION=OPTION, got '{pair}'"))?;
            let id = id
                .trim()
                .parse::<u32>()
                .map_err(|_| format!("'{}' is not a question id", id.trim()))?;
            let letter = OptionLetter::from_str(letter)?;
            Ok(AnswerSelection::new(QuestionId(id), letter))
        })
        .collect()
}
