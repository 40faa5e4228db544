use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{NaiveDate, NaiveDateTime};

use super::*;
use crate::clock::FixedClock;
use crate::random::SeededRandom;
use crate::store::MemoryStore;
use crate::welfare::animals::Animal;
use crate::welfare::catalog::{Question, QuestionDraft};
use crate::welfare::evaluations::{Evaluation, EvaluationId};

/// Every uniform draw is 0 and every integer draw is the lower bound.
struct ZeroRandom;

impl RandomSource for ZeroRandom {
    fn uniform(&mut self) -> f64 {
        0.0
    }

    fn uniform_int(&mut self, lo: i64, _hi: i64) -> i64 {
        lo
    }
}

fn clock() -> FixedClock {
    FixedClock(
        NaiveDate::from_ymd_opt(2025, 6, 30)
            .and_then(|date| date.and_hms_opt(15, 30, 0))
            .expect("valid timestamp"),
    )
}

fn seeded_store() -> MemoryStore {
    let store = MemoryStore::default();
    QuestionCatalog::seed(&store).expect("seed catalog");
    store
}

#[test]
fn zero_rolls_answer_every_question_at_the_top_tier() {
    let store = seeded_store();

    let outcome = SimulationEngine::default()
        .run(&store, &mut ZeroRandom, &clock())
        .expect("simulate");

    assert_eq!(
        outcome,
        SimulationOutcome::Seeded {
            animals: 15,
            evaluations: 45
        }
    );
    for evaluation in EvaluationRepository::all(&store).expect("evaluations") {
        assert_eq!(evaluation.overall_score(), 100);
        assert_eq!(evaluation.answers().len(), 30);
        assert!(evaluation
            .answers()
            .iter()
            .all(|answer| answer.points() == 5 && answer.comment() == Some("No issues.")));
    }
}

#[test]
fn visits_are_spaced_backwards_from_now() {
    let store = seeded_store();
    let now = clock().0;
    SimulationEngine::default()
        .run(&store, &mut ZeroRandom, &clock())
        .expect("simulate");

    let kaiser = AnimalRepository::all(&store)
        .expect("animals")
        .into_iter()
        .find(|animal| animal.name == "Kaiser")
        .expect("Kaiser");
    assert_eq!(kaiser.species, "African Lion");
    assert_eq!(kaiser.birth_date, NaiveDate::from_ymd_opt(2023, 6, 30).expect("valid"));
    assert_eq!(kaiser.owner.role, OwnerRole::Admin);

    let mut history = store.for_animal(kaiser.id).expect("history");
    history.reverse();
    let stamps: Vec<NaiveDateTime> = history.iter().map(Evaluation::timestamp).collect();
    assert_eq!(
        stamps,
        vec![now - Duration::days(10), now - Duration::days(5), now]
    );

    assert_eq!(history[0].evaluator_role(), "Head Veterinarian");
    assert_eq!(history[1].evaluator_role(), "Senior Caretaker");
    assert_eq!(history[0].started_at(), Some(now - Duration::days(10) - Duration::hours(1)));
    assert_eq!(history[0].ended_at(), Some(now - Duration::days(10)));
    assert_eq!(history[0].location(), "Savanna Sector A");
    assert_eq!(history[0].evaluator_name(), "Dr. Smith");
    assert_eq!(history[0].confidence_level(), 5);
}

#[test]
fn configured_spacing_moves_the_history_window() {
    let store = seeded_store();
    let now = clock().0;
    let settings = SimulationSettings {
        seed: None,
        visit_spacing_days: 2,
    };
    SimulationEngine::from_settings(&settings)
        .run(&store, &mut ZeroRandom, &clock())
        .expect("simulate");

    let oldest = EvaluationRepository::all(&store)
        .expect("evaluations")
        .iter()
        .map(Evaluation::timestamp)
        .min()
        .expect("history");
    assert_eq!(oldest, now - Duration::days(4));
}

#[test]
fn same_seed_and_clock_produce_identical_stores() {
    let first = seeded_store();
    let second = seeded_store();

    SimulationEngine::default()
        .run(&first, &mut SeededRandom::from_seed(7), &clock())
        .expect("first run");
    SimulationEngine::default()
        .run(&second, &mut SeededRandom::from_seed(7), &clock())
        .expect("second run");

    let left = serde_json::to_string(&first.snapshot().expect("snapshot")).expect("json");
    let right = serde_json::to_string(&second.snapshot().expect("snapshot")).expect("json");
    assert_eq!(left, right);
}

#[test]
fn seeded_histories_stay_within_the_drawn_ranges() {
    let store = seeded_store();
    let today = clock().0.date();
    SimulationEngine::default()
        .run(&store, &mut SeededRandom::from_seed(2024), &clock())
        .expect("simulate");

    for animal in AnimalRepository::all(&store).expect("animals") {
        let age = animal.age_in_years(today);
        assert!((2..=16).contains(&age), "{} is {age}", animal.name);

        let history = store.for_animal(animal.id).expect("history");
        assert!((3..=7).contains(&history.len()));
        for evaluation in history {
            assert!((20..=100).contains(&evaluation.overall_score()));
            for answer in evaluation.answers() {
                let expected = if answer.points() < 4 {
                    "Needs observation."
                } else {
                    "No issues."
                };
                assert_eq!(answer.comment(), Some(expected));
            }
        }
    }
}

#[test]
fn rerunning_with_animals_present_is_a_no_op() {
    let store = seeded_store();
    SimulationEngine::default()
        .run(&store, &mut SeededRandom::from_seed(11), &clock())
        .expect("first run");
    let before = store.snapshot().expect("snapshot");

    let outcome = SimulationEngine::default()
        .run(&store, &mut SeededRandom::from_seed(99), &clock())
        .expect("second run");

    assert_eq!(
        outcome,
        SimulationOutcome::Skipped {
            existing_animals: 15
        }
    );
    assert_eq!(store.snapshot().expect("snapshot"), before);
}

#[test]
fn empty_catalog_fails_fast() {
    let store = MemoryStore::default();

    let result = SimulationEngine::default().run(&store, &mut ZeroRandom, &clock());

    assert!(matches!(result, Err(SimulationError::CatalogNotSeeded)));
    assert_eq!(AnimalRepository::count(&store), Ok(0));
}

/// Delegates to a memory store but refuses evaluation writes once its budget is spent.
struct FailingStore {
    inner: MemoryStore,
    evaluation_budget: AtomicUsize,
}

impl QuestionRepository for FailingStore {
    fn count(&self) -> Result<usize, RepositoryError> {
        QuestionRepository::count(&self.inner)
    }

    fn insert_all(&self, drafts: Vec<QuestionDraft>) -> Result<Vec<Question>, RepositoryError> {
        QuestionRepository::insert_all(&self.inner, drafts)
    }

    fn all(&self) -> Result<Vec<Question>, RepositoryError> {
        QuestionRepository::all(&self.inner)
    }
}

impl AnimalRepository for FailingStore {
    fn count(&self) -> Result<usize, RepositoryError> {
        AnimalRepository::count(&self.inner)
    }

    fn insert(&self, draft: AnimalDraft) -> Result<Animal, RepositoryError> {
        AnimalRepository::insert(&self.inner, draft)
    }

    fn insert_all(&self, drafts: Vec<AnimalDraft>) -> Result<Vec<Animal>, RepositoryError> {
        AnimalRepository::insert_all(&self.inner, drafts)
    }

    fn fetch(&self, id: AnimalId) -> Result<Option<Animal>, RepositoryError> {
        AnimalRepository::fetch(&self.inner, id)
    }

    fn all(&self) -> Result<Vec<Animal>, RepositoryError> {
        AnimalRepository::all(&self.inner)
    }

    fn delete(&self, id: AnimalId) -> Result<(), RepositoryError> {
        AnimalRepository::delete(&self.inner, id)
    }
}

impl EvaluationRepository for FailingStore {
    fn count(&self) -> Result<usize, RepositoryError> {
        EvaluationRepository::count(&self.inner)
    }

    fn insert(&self, draft: EvaluationDraft) -> Result<Evaluation, RepositoryError> {
        let remaining = self.evaluation_budget.load(Ordering::SeqCst);
        if remaining == 0 {
            return Err(RepositoryError::Unavailable("disk full".to_string()));
        }
        self.evaluation_budget.store(remaining - 1, Ordering::SeqCst);
        EvaluationRepository::insert(&self.inner, draft)
    }

    fn replace(&self, evaluation: Evaluation) -> Result<(), RepositoryError> {
        self.inner.replace(evaluation)
    }

    fn fetch(&self, id: EvaluationId) -> Result<Option<Evaluation>, RepositoryError> {
        EvaluationRepository::fetch(&self.inner, id)
    }

    fn for_animal(&self, animal_id: AnimalId) -> Result<Vec<Evaluation>, RepositoryError> {
        self.inner.for_animal(animal_id)
    }

    fn all(&self) -> Result<Vec<Evaluation>, RepositoryError> {
        EvaluationRepository::all(&self.inner)
    }

    fn delete(&self, id: EvaluationId) -> Result<(), RepositoryError> {
        EvaluationRepository::delete(&self.inner, id)
    }
}

#[test]
fn failed_write_rolls_back_the_whole_run() {
    let store = FailingStore {
        inner: seeded_store(),
        evaluation_budget: AtomicUsize::new(10),
    };

    let result = SimulationEngine::default().run(&store, &mut ZeroRandom, &clock());

    assert!(matches!(
        result,
        Err(SimulationError::Persistence(RepositoryError::Unavailable(_)))
    ));
    assert_eq!(AnimalRepository::count(&store), Ok(0));
    assert_eq!(EvaluationRepository::count(&store), Ok(0));
    assert_eq!(QuestionRepository::count(&store), Ok(30));
}
