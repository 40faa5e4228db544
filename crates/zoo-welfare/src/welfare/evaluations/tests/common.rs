use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use crate::clock::FixedClock;
use crate::store::MemoryStore;
use crate::welfare::animals::{Animal, AnimalDraft, OwnerRef, OwnerRole};
use crate::welfare::catalog::{
    AnswerOption, Category, OptionLetter, Question, QuestionCatalog, QuestionId,
};
use crate::welfare::evaluations::{AnswerSelection, EvaluationMetadata, EvaluationService};
use crate::welfare::repository::AnimalRepository;

pub(super) fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 4, day)
        .and_then(|date| date.and_hms_opt(hour, 0, 0))
        .expect("valid timestamp")
}

pub(super) fn now() -> NaiveDateTime {
    at(20, 12)
}

pub(super) fn metadata() -> EvaluationMetadata {
    EvaluationMetadata {
        timestamp: None,
        started_at: Some(at(20, 9)),
        ended_at: Some(at(20, 10)),
        location: "Primate Pavilion".to_string(),
        evaluator_name: "Keeper Martinez".to_string(),
        evaluator_role: "Senior Caretaker".to_string(),
        confidence_level: 4,
        notes: "Routine check".to_string(),
        photo_urls: vec![
            "https://photos.welfare.local/a.jpg".to_string(),
            "https://photos.welfare.local/b.jpg".to_string(),
        ],
    }
}

fn option(label: &str, points: u8) -> AnswerOption {
    AnswerOption {
        label: label.to_string(),
        points,
    }
}

/// Two questions: one full A-E scale and one offering only A, C and E.
pub(super) fn small_catalog() -> QuestionCatalog {
    let full: BTreeMap<OptionLetter, AnswerOption> = [
        (OptionLetter::A, option("Excellent", 5)),
        (OptionLetter::B, option("Good", 4)),
        (OptionLetter::C, option("Fair", 3)),
        (OptionLetter::D, option("Poor", 2)),
        (OptionLetter::E, option("Critical", 1)),
    ]
    .into_iter()
    .collect();
    let sparse: BTreeMap<OptionLetter, AnswerOption> = [
        (OptionLetter::A, option("Always", 5)),
        (OptionLetter::C, option("Sometimes", 3)),
        (OptionLetter::E, option("Never", 1)),
    ]
    .into_iter()
    .collect();

    QuestionCatalog::from_questions(vec![
        Question {
            id: QuestionId(1),
            text: "Is the body condition appropriate?".to_string(),
            category: Category::Health,
            options: full,
        },
        Question {
            id: QuestionId(2),
            text: "Does the animal use the whole enclosure?".to_string(),
            category: Category::Behavior,
            options: sparse,
        },
    ])
    .expect("valid catalog")
}

pub(super) fn select(pairs: &[(u32, OptionLetter)]) -> Vec<AnswerSelection> {
    pairs
        .iter()
        .map(|(id, letter)| AnswerSelection::new(QuestionId(*id), *letter))
        .collect()
}

pub(super) fn animal_draft(name: &str) -> AnimalDraft {
    AnimalDraft {
        name: name.to_string(),
        species: "Bornean Orangutan".to_string(),
        birth_date: NaiveDate::from_ymd_opt(2012, 8, 3).expect("valid date"),
        notes: String::new(),
        photo_url: None,
        owner: OwnerRef {
            account: "caretaker@welfare.local".to_string(),
            role: OwnerRole::Caretaker,
        },
    }
}

pub(super) type TestService = EvaluationService<MemoryStore, MemoryStore, FixedClock>;

pub(super) fn build_service() -> (TestService, Arc<MemoryStore>, Animal) {
    let store = Arc::new(MemoryStore::default());
    let animal =
        AnimalRepository::insert(store.as_ref(), animal_draft("Budi")).expect("insert animal");
    let service = EvaluationService::new(
        Arc::new(small_catalog()),
        store.clone(),
        store.clone(),
        Arc::new(FixedClock(now())),
    );
    (service, store, animal)
}
