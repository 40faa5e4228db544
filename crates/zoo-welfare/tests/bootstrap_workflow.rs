use std::sync::{Arc, Barrier};
use std::thread;

use chrono::{NaiveDate, NaiveDateTime};
use zoo_welfare::clock::FixedClock;
use zoo_welfare::random::SeededRandom;
use zoo_welfare::store::MemoryStore;
use zoo_welfare::welfare::report::{dashboard, WelfareStatus, RECENT_ACTIVITY_LIMIT};
use zoo_welfare::welfare::{
    AnimalRepository, BootstrapPhase, Bootstrapper, EvaluationRepository, QuestionCatalog,
    QuestionRepository,
};

fn demo_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 10, 1)
        .and_then(|date| date.and_hms_opt(16, 45, 0))
        .expect("valid timestamp")
}

#[test]
fn bootstrap_populates_a_consistent_demo_store() {
    let store = MemoryStore::default();

    let report = Bootstrapper::default()
        .run(&store, &mut SeededRandom::from_seed(1234), &FixedClock(demo_now()))
        .expect("bootstrap");

    assert_eq!(report.catalog, BootstrapPhase::Seeded { created: 30 });
    assert_eq!(report.animals, BootstrapPhase::Seeded { created: 15 });
    assert!((45..=105).contains(&report.evaluations));

    let catalog = QuestionCatalog::load(&store).expect("catalog");
    let evaluations = EvaluationRepository::all(&store).expect("evaluations");
    assert_eq!(evaluations.len(), report.evaluations);

    for evaluation in &evaluations {
        assert_eq!(evaluation.answers().len(), catalog.len());
        let sum: u64 = evaluation
            .answers()
            .iter()
            .map(|answer| {
                let question = catalog.get(answer.question_id()).expect("known question");
                let option = question
                    .option(answer.selected_option())
                    .expect("selected option exists");
                assert_eq!(option.points, answer.points());
                u64::from(answer.points())
            })
            .sum();
        let denominator = 5 * catalog.len() as u64;
        let expected = (200 * sum + denominator) / (2 * denominator);
        assert_eq!(u64::from(evaluation.overall_score()), expected);
        assert!(evaluation.timestamp() <= demo_now());
    }

    let animals = AnimalRepository::all(&store).expect("animals");
    let view = dashboard(&animals, &evaluations, 75);
    assert_eq!(view.total_animals, 15);
    assert_eq!(view.recent_activity.len(), RECENT_ACTIVITY_LIMIT);
    assert_ne!(view.status, WelfareStatus::Critical);
}

#[test]
fn bootstrap_never_touches_a_populated_store() {
    let store = MemoryStore::default();
    let bootstrapper = Bootstrapper::default();
    bootstrapper
        .run(&store, &mut SeededRandom::from_seed(1), &FixedClock(demo_now()))
        .expect("first bootstrap");
    let questions = QuestionRepository::all(&store).expect("questions");
    let evaluations = EvaluationRepository::count(&store).expect("count");

    for seed in [2, 3] {
        let report = bootstrapper
            .run(&store, &mut SeededRandom::from_seed(seed), &FixedClock(demo_now()))
            .expect("repeat bootstrap");
        assert_eq!(report.catalog, BootstrapPhase::Skipped { existing: 30 });
        assert_eq!(report.animals, BootstrapPhase::Skipped { existing: 15 });
    }

    assert_eq!(QuestionRepository::all(&store).expect("questions"), questions);
    assert_eq!(EvaluationRepository::count(&store).expect("count"), evaluations);
}

#[test]
fn concurrent_bootstraps_populate_the_store_once() {
    let store = MemoryStore::default();
    let barrier = Arc::new(Barrier::new(2));

    let handles: Vec<_> = [11_u64, 12]
        .into_iter()
        .map(|seed| {
            let store = store.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                Bootstrapper::default().run(
                    &store,
                    &mut SeededRandom::from_seed(seed),
                    &FixedClock(demo_now()),
                )
            })
        })
        .collect();

    let reports: Vec<_> = handles
        .into_iter()
        .map(|handle| {
            handle
                .join()
                .expect("bootstrap thread")
                .expect("bootstrap")
        })
        .collect();

    let seeded_animals = reports
        .iter()
        .filter(|report| matches!(report.animals, BootstrapPhase::Seeded { .. }))
        .count();
    let seeded_catalogs = reports
        .iter()
        .filter(|report| matches!(report.catalog, BootstrapPhase::Seeded { .. }))
        .count();
    assert_eq!(seeded_animals, 1);
    assert_eq!(seeded_catalogs, 1);

    assert_eq!(AnimalRepository::count(&store), Ok(15));
    assert_eq!(QuestionRepository::count(&store), Ok(30));
    let written: usize = reports.iter().map(|report| report.evaluations).sum();
    assert_eq!(EvaluationRepository::count(&store), Ok(written));
}
