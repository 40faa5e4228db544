use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use zoo_welfare::config::AppConfig;
use zoo_welfare::error::AppError;
use zoo_welfare::telemetry;
use zoo_welfare::welfare::animals::OwnerRole;
use zoo_welfare::welfare::catalog::Category;

use crate::commands;
use crate::infra::AnswerList;

#[derive(Parser, Debug)]
#[command(
    name = "zoo-welfare",
    about = "Score animal welfare evaluations and explore simulated care histories",
    version
)]
struct Cli {
    /// Override the configured snapshot file (WELFARE_DATA_PATH)
    #[arg(long, global = true)]
    data: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Seed the question catalog and simulated history into an empty store
    Seed(SeedArgs),
    /// List the welfare questionnaire
    Catalog(CatalogArgs),
    /// List or search registered animals
    Animals(AnimalsArgs),
    /// Register a new animal
    RegisterAnimal(RegisterAnimalArgs),
    /// Remove an animal together with its evaluation history
    DeleteAnimal(DeleteAnimalArgs),
    /// Record a complete evaluation for one animal
    Evaluate(EvaluateArgs),
    /// Re-score an existing evaluation with a new answer set
    UpdateEvaluation(UpdateEvaluationArgs),
    /// Remove one evaluation and its answers
    DeleteEvaluation(DeleteEvaluationArgs),
    /// Score history, trend and category breakdown for one animal
    Report(ReportArgs),
    /// Organisation-wide welfare overview
    Dashboard(DashboardArgs),
    /// Write evaluations and answers as CSV files
    Export(ExportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct SeedArgs {
    /// Seed for the simulation RNG (overrides WELFARE_SIMULATION_SEED)
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct CatalogArgs {
    /// Only show one category (e.g. nutrition, mental-state)
    #[arg(long, value_parser = crate::infra::parse_category)]
    pub(crate) category: Option<Category>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct AnimalsArgs {
    /// Case-insensitive match against name or species
    #[arg(long)]
    pub(crate) search: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct RegisterAnimalArgs {
    #[arg(long)]
    pub(crate) name: String,
    #[arg(long)]
    pub(crate) species: String,
    /// Birth date as YYYY-MM-DD
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) born: NaiveDate,
    #[arg(long, default_value = "")]
    pub(crate) notes: String,
    #[arg(long)]
    pub(crate) photo_url: Option<String>,
    /// Account responsible for the animal
    #[arg(long, default_value = "caretaker@welfare.local")]
    pub(crate) owner: String,
    /// Role of the owning account (admin or caretaker)
    #[arg(long, default_value = "caretaker", value_parser = crate::infra::parse_owner_role)]
    pub(crate) owner_role: OwnerRole,
}

#[derive(Args, Debug)]
pub(crate) struct DeleteAnimalArgs {
    /// Animal identifier
    #[arg(long)]
    pub(crate) animal: u64,
}

/// Answers and session details shared by `evaluate` and `update-evaluation`.
#[derive(Args, Debug)]
pub(crate) struct SessionArgs {
    /// Comma-separated answers such as "1=A,2=C,3=B"
    #[arg(long, value_parser = crate::infra::parse_answer_list)]
    pub(crate) answers: AnswerList,
    /// Name of the person performing the evaluation
    #[arg(long)]
    pub(crate) evaluator: String,
    #[arg(long, default_value = "Senior Caretaker")]
    pub(crate) role: String,
    #[arg(long, default_value = "")]
    pub(crate) location: String,
    /// Evaluator confidence from 1 to 5
    #[arg(long, default_value_t = 3)]
    pub(crate) confidence: u8,
    #[arg(long, default_value = "")]
    pub(crate) notes: String,
}

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Animal identifier
    #[arg(long)]
    pub(crate) animal: u64,
    #[command(flatten)]
    pub(crate) session: SessionArgs,
}

#[derive(Args, Debug)]
pub(crate) struct UpdateEvaluationArgs {
    /// Evaluation identifier
    #[arg(long)]
    pub(crate) evaluation: u64,
    #[command(flatten)]
    pub(crate) session: SessionArgs,
}

#[derive(Args, Debug)]
pub(crate) struct DeleteEvaluationArgs {
    /// Evaluation identifier
    #[arg(long)]
    pub(crate) evaluation: u64,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Animal identifier
    #[arg(long)]
    pub(crate) animal: u64,
    /// Emit JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DashboardArgs {
    /// Emit JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
    /// Override the at-risk threshold (WELFARE_ALERT_THRESHOLD)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub(crate) threshold: Option<u8>,
}

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Directory receiving evaluations.csv and answers.csv
    #[arg(long)]
    pub(crate) out: PathBuf,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    if let Some(path) = cli.data {
        config.storage.data_path = path;
    }

    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Seed(args) => commands::seed(&config, args),
        Command::Catalog(args) => commands::catalog(&config, args),
        Command::Animals(args) => commands::animals(&config, args),
        Command::RegisterAnimal(args) => commands::register_animal(&config, args),
        Command::DeleteAnimal(args) => commands::delete_animal(&config, args),
        Command::Evaluate(args) => commands::evaluate(&config, args),
        Command::UpdateEvaluation(args) => commands::update_evaluation(&config, args),
        Command::DeleteEvaluation(args) => commands::delete_evaluation(&config, args),
        Command::Report(args) => commands::report(&config, args),
        Command::Dashboard(args) => commands::dashboard(&config, args),
        Command::Export(args) => commands::export(&config, args),
    }
}
