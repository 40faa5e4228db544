use std::sync::Arc;

use zoo_welfare::clock::{Clock, SystemClock};
use zoo_welfare::config::AppConfig;
use zoo_welfare::error::AppError;
use zoo_welfare::store::MemoryStore;
use zoo_welfare::welfare::animals::{AnimalDraft, AnimalId, AnimalRegistry, OwnerRef};
use zoo_welfare::welfare::bootstrap::{BootstrapPhase, Bootstrapper};
use zoo_welfare::welfare::catalog::QuestionCatalog;
use zoo_welfare::welfare::evaluations::{
    AnswerSelection, EvaluationId, EvaluationMetadata, EvaluationService,
};
use zoo_welfare::welfare::export::export_to_dir;
use zoo_welfare::welfare::report::{AnimalHistoryView, DashboardView, WelfareReporter};
use zoo_welfare::welfare::simulation::SimulationEngine;
use zoo_welfare::welfare::EvaluationRepository;

use crate::cli::{
    AnimalsArgs, CatalogArgs, DashboardArgs, DeleteAnimalArgs, DeleteEvaluationArgs,
    EvaluateArgs, ExportArgs, RegisterAnimalArgs, ReportArgs, SeedArgs, SessionArgs,
    UpdateEvaluationArgs,
};
use crate::infra::{load_store, random_source, save_store};

pub(crate) fn seed(config: &AppConfig, args: SeedArgs) -> Result<(), AppError> {
    let store = load_store(&config.storage.data_path)?;
    let mut random = random_source(args.seed.or(config.simulation.seed));
    let bootstrapper = Bootstrapper::new(SimulationEngine::from_settings(&config.simulation));

    let report = bootstrapper.run(&store, &mut random, &SystemClock)?;
    save_store(&store, &config.storage.data_path)?;

    println!("Store: {}", config.storage.data_path.display());
    println!("- question catalog: {}", describe_phase(report.catalog, "questions"));
    println!("- animals: {}", describe_phase(report.animals, "animals"));
    if report.evaluations > 0 {
        println!("- simulated evaluations: {}", report.evaluations);
    }
    Ok(())
}

fn describe_phase(phase: BootstrapPhase, noun: &str) -> String {
    match phase {
        BootstrapPhase::Seeded { created } => format!("seeded {created} {noun}"),
        BootstrapPhase::Skipped { existing } => {
            format!("skipped ({existing} {noun} already present)")
        }
    }
}

pub(crate) fn catalog(config: &AppConfig, args: CatalogArgs) -> Result<(), AppError> {
    let store = load_store(&config.storage.data_path)?;
    let mut catalog = QuestionCatalog::load(&store)?;
    if catalog.is_empty() {
        println!("(store not seeded yet; showing the standard catalog)");
        catalog = QuestionCatalog::standard();
    }

    let categories = match args.category {
        Some(category) => vec![category],
        None => catalog.categories(),
    };

    for category in categories {
        println!("\n{}", category.label());
        for question in catalog.in_category(category) {
            println!("  {:>2}. {}", question.id, question.text);
            for (letter, option) in &question.options {
                println!("      {letter}) {} [{} pts]", option.label, option.points);
            }
        }
    }
    Ok(())
}

pub(crate) fn animals(config: &AppConfig, args: AnimalsArgs) -> Result<(), AppError> {
    let store = Arc::new(load_store(&config.storage.data_path)?);
    let registry = AnimalRegistry::new(store);
    let today = SystemClock.now().date();

    let animals = match args.search.as_deref() {
        Some(query) => registry.search(query)?,
        None => registry.list()?,
    };
    if animals.is_empty() {
        println!("No animals found.");
        return Ok(());
    }

    for animal in animals {
        println!(
            "{:>3}  {:<12} {:<22} {:>2}y  {} ({})",
            animal.id,
            animal.name,
            animal.species,
            animal.age_in_years(today),
            animal.owner.account,
            animal.owner.role.label()
        );
    }
    Ok(())
}

pub(crate) fn register_animal(
    config: &AppConfig,
    args: RegisterAnimalArgs,
) -> Result<(), AppError> {
    let store = Arc::new(load_store(&config.storage.data_path)?);
    let registry = AnimalRegistry::new(store.clone());

    let animal = registry.register(AnimalDraft {
        name: args.name,
        species: args.species,
        birth_date: args.born,
        notes: args.notes,
        photo_url: args.photo_url,
        owner: OwnerRef {
            account: args.owner,
            role: args.owner_role,
        },
    })?;
    save_store(&store, &config.storage.data_path)?;

    println!(
        "Registered animal {}: {} ({})",
        animal.id, animal.name, animal.species
    );
    Ok(())
}

pub(crate) fn delete_animal(config: &AppConfig, args: DeleteAnimalArgs) -> Result<(), AppError> {
    let store = Arc::new(load_store(&config.storage.data_path)?);
    let registry = AnimalRegistry::new(store.clone());

    let id = AnimalId(args.animal);
    let animal = registry.get(id)?;
    registry.delete(id)?;
    save_store(&store, &config.storage.data_path)?;

    println!("Deleted animal {} ({}) and its evaluations", animal.id, animal.name);
    Ok(())
}

pub(crate) fn evaluate(config: &AppConfig, args: EvaluateArgs) -> Result<(), AppError> {
    let store = Arc::new(load_store(&config.storage.data_path)?);
    let service = evaluation_service(&store)?;

    let (metadata, selections) = session_parts(args.session);
    let evaluation = service.create(AnimalId(args.animal), metadata, selections)?;
    save_store(&store, &config.storage.data_path)?;

    println!(
        "Recorded evaluation {} for animal {}: {}%",
        evaluation.id(),
        evaluation.animal_id(),
        evaluation.overall_score()
    );
    Ok(())
}

pub(crate) fn update_evaluation(
    config: &AppConfig,
    args: UpdateEvaluationArgs,
) -> Result<(), AppError> {
    let store = Arc::new(load_store(&config.storage.data_path)?);
    let service = evaluation_service(&store)?;

    let (metadata, selections) = session_parts(args.session);
    let evaluation = service.update(EvaluationId(args.evaluation), metadata, selections)?;
    save_store(&store, &config.storage.data_path)?;

    println!(
        "Updated evaluation {} for animal {}: {}%",
        evaluation.id(),
        evaluation.animal_id(),
        evaluation.overall_score()
    );
    Ok(())
}

pub(crate) fn delete_evaluation(
    config: &AppConfig,
    args: DeleteEvaluationArgs,
) -> Result<(), AppError> {
    let store = Arc::new(load_store(&config.storage.data_path)?);
    let service = evaluation_service(&store)?;

    service.delete(EvaluationId(args.evaluation))?;
    save_store(&store, &config.storage.data_path)?;

    println!("Deleted evaluation {}", args.evaluation);
    Ok(())
}

fn evaluation_service(
    store: &Arc<MemoryStore>,
) -> Result<EvaluationService<MemoryStore, MemoryStore, SystemClock>, AppError> {
    let catalog = Arc::new(QuestionCatalog::load(store.as_ref())?);
    Ok(EvaluationService::new(
        catalog,
        store.clone(),
        store.clone(),
        Arc::new(SystemClock),
    ))
}

fn session_parts(session: SessionArgs) -> (EvaluationMetadata, Vec<AnswerSelection>) {
    let metadata = EvaluationMetadata {
        location: session.location,
        evaluator_name: session.evaluator,
        evaluator_role: session.role,
        confidence_level: session.confidence,
        notes: session.notes,
        ..EvaluationMetadata::default()
    };
    (metadata, session.answers.0)
}

pub(crate) fn report(config: &AppConfig, args: ReportArgs) -> Result<(), AppError> {
    let reporter = reporter(config, config.reporting.alert_threshold)?;
    let history = reporter.animal_history(AnimalId(args.animal))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&history)?);
    } else {
        render_history(&history);
    }
    Ok(())
}

pub(crate) fn dashboard(config: &AppConfig, args: DashboardArgs) -> Result<(), AppError> {
    let threshold = args.threshold.unwrap_or(config.reporting.alert_threshold);
    let view = reporter(config, threshold)?.dashboard()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        render_dashboard(&view);
    }
    Ok(())
}

pub(crate) fn export(config: &AppConfig, args: ExportArgs) -> Result<(), AppError> {
    let store = load_store(&config.storage.data_path)?;
    let evaluations = EvaluationRepository::all(&store)?;
    let summary = export_to_dir(&args.out, &evaluations)?;

    println!(
        "Wrote {} evaluations to {}",
        summary.evaluations,
        summary.evaluations_path.display()
    );
    println!(
        "Wrote {} answers to {}",
        summary.answers,
        summary.answers_path.display()
    );
    Ok(())
}

fn reporter(
    config: &AppConfig,
    alert_threshold: u8,
) -> Result<WelfareReporter<MemoryStore, MemoryStore>, AppError> {
    let store = Arc::new(load_store(&config.storage.data_path)?);
    let catalog = Arc::new(QuestionCatalog::load(store.as_ref())?);
    Ok(WelfareReporter::new(
        catalog,
        store.clone(),
        store,
        alert_threshold,
    ))
}

fn render_history(history: &AnimalHistoryView) {
    println!(
        "{} ({}) - animal {}",
        history.name, history.species, history.animal_id
    );
    println!(
        "- {} evaluations | average {}% | trend {}",
        history.evaluations, history.average_score, history.trend_label
    );
    if let Some(latest) = history.latest_score {
        println!("- latest score {latest}%");
    }

    if !history.points.is_empty() {
        println!("Score history (oldest first):");
        for point in &history.points {
            println!(
                "  - {} #{}: {}%",
                point.timestamp.format("%Y-%m-%d %H:%M"),
                point.evaluation_id,
                point.score
            );
        }
    }

    if !history.latest_breakdown.is_empty() {
        println!("Latest evaluation by category:");
        for entry in &history.latest_breakdown {
            println!(
                "  - {}: {}% ({} answers)",
                entry.category_label, entry.percent, entry.answered
            );
        }
    }
}

fn render_dashboard(view: &DashboardView) {
    println!("Welfare dashboard");
    println!(
        "- {} animals | {} evaluations | average {}% ({})",
        view.total_animals, view.total_evaluations, view.average_score, view.status_label
    );

    if view.at_risk.is_empty() {
        println!("At risk (below {}%): none", view.alert_threshold);
    } else {
        println!("At risk (below {}%):", view.alert_threshold);
        for alert in &view.at_risk {
            println!(
                "  - {} ({}): {}% on {}",
                alert.animal_name,
                alert.species,
                alert.score,
                alert.timestamp.format("%Y-%m-%d")
            );
        }
    }

    if !view.recent_activity.is_empty() {
        println!("Recent activity:");
        for entry in &view.recent_activity {
            println!(
                "  - {} {} by {}: {}%",
                entry.timestamp.format("%Y-%m-%d %H:%M"),
                entry.animal_name,
                entry.evaluator_name,
                entry.score
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use chrono::NaiveDate;
    use zoo_welfare::config::{
        AppEnvironment, ReportingConfig, SimulationSettings, StorageConfig, TelemetryConfig,
    };
    use zoo_welfare::welfare::animals::OwnerRole;
    use zoo_welfare::welfare::catalog::OptionLetter;
    use zoo_welfare::welfare::{AnimalRepository, QuestionRepository};

    use crate::infra::AnswerList;

    fn config(data_path: &Path) -> AppConfig {
        AppConfig {
            environment: AppEnvironment::Test,
            storage: StorageConfig {
                data_path: data_path.to_path_buf(),
            },
            simulation: SimulationSettings {
                seed: Some(7),
                visit_spacing_days: 5,
            },
            reporting: ReportingConfig {
                alert_threshold: 75,
            },
            telemetry: TelemetryConfig {
                log_level: "warn".to_string(),
            },
        }
    }

    fn uniform_answers(letter: OptionLetter) -> AnswerList {
        AnswerList(
            QuestionCatalog::standard()
                .questions()
                .iter()
                .map(|question| AnswerSelection::new(question.id, letter))
                .collect(),
        )
    }

    fn session(letter: OptionLetter) -> SessionArgs {
        SessionArgs {
            answers: uniform_answers(letter),
            evaluator: "Dr. Okafor".to_string(),
            role: "Head Veterinarian".to_string(),
            location: "Savannah Paddock".to_string(),
            confidence: 4,
            notes: String::new(),
        }
    }

    #[test]
    fn registry_and_evaluation_commands_round_trip_through_the_snapshot() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("welfare.json");
        let config = config(&path);

        let store = MemoryStore::default();
        QuestionCatalog::seed(&store).expect("seed catalog");
        save_store(&store, &path).expect("save");

        register_animal(
            &config,
            RegisterAnimalArgs {
                name: "Tafari".to_string(),
                species: "Giraffe".to_string(),
                born: NaiveDate::from_ymd_opt(2017, 8, 20).expect("valid date"),
                notes: String::new(),
                photo_url: None,
                owner: "caretaker@welfare.local".to_string(),
                owner_role: OwnerRole::Caretaker,
            },
        )
        .expect("register");
        let animals = AnimalRepository::all(&load_store(&path).expect("load")).expect("animals");
        assert_eq!(animals.len(), 1);
        assert_eq!(animals[0].name, "Tafari");
        let animal = animals[0].id;

        evaluate(
            &config,
            EvaluateArgs {
                animal: animal.0,
                session: session(OptionLetter::A),
            },
        )
        .expect("evaluate");
        let stored = EvaluationRepository::all(&load_store(&path).expect("load")).expect("all");
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].overall_score(), 100);
        let evaluation = stored[0].id();

        update_evaluation(
            &config,
            UpdateEvaluationArgs {
                evaluation: evaluation.0,
                session: session(OptionLetter::E),
            },
        )
        .expect("update");
        let updated = EvaluationRepository::all(&load_store(&path).expect("load")).expect("all");
        assert_eq!(updated[0].id(), evaluation);
        assert_eq!(updated[0].overall_score(), 20);
        assert_eq!(updated[0].timestamp(), stored[0].timestamp());

        delete_evaluation(
            &config,
            DeleteEvaluationArgs {
                evaluation: evaluation.0,
            },
        )
        .expect("delete evaluation");
        assert_eq!(
            EvaluationRepository::count(&load_store(&path).expect("load")),
            Ok(0)
        );

        delete_animal(&config, DeleteAnimalArgs { animal: animal.0 }).expect("delete animal");
        let reloaded = load_store(&path).expect("load");
        assert_eq!(AnimalRepository::count(&reloaded), Ok(0));
        assert_eq!(QuestionRepository::count(&reloaded), Ok(30));
    }

    #[test]
    fn unknown_records_map_to_the_rejected_input_exit_code() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = config(&dir.path().join("welfare.json"));

        let missing_animal = delete_animal(&config, DeleteAnimalArgs { animal: 42 })
            .expect_err("no such animal");
        assert_eq!(missing_animal.exit_code(), 2);

        let missing_evaluation = delete_evaluation(&config, DeleteEvaluationArgs { evaluation: 9 })
            .expect_err("no such evaluation");
        assert_eq!(missing_evaluation.exit_code(), 2);
    }
}
