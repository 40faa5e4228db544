use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::welfare::animals::AnimalError;
use crate::welfare::bootstrap::BootstrapError;
use crate::welfare::catalog::CatalogLoadError;
use crate::welfare::evaluations::{EvaluationError, EvaluationErrorKind};
use crate::welfare::export::ExportError;
use crate::welfare::report::ReportError;
use crate::welfare::repository::RepositoryError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Snapshot(serde_json::Error),
    Repository(RepositoryError),
    Catalog(CatalogLoadError),
    Animal(AnimalError),
    Evaluation(EvaluationError),
    Bootstrap(BootstrapError),
    Report(ReportError),
    Export(ExportError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Snapshot(err) => write!(f, "snapshot error: {}", err),
            AppError::Repository(err) => write!(f, "storage error: {}", err),
            AppError::Catalog(err) => write!(f, "catalog error: {}", err),
            AppError::Animal(err) => write!(f, "animal error: {}", err),
            AppError::Evaluation(err) => write!(f, "evaluation error: {}", err),
            AppError::Bootstrap(err) => write!(f, "bootstrap error: {}", err),
            AppError::Report(err) => write!(f, "report error: {}", err),
            AppError::Export(err) => write!(f, "export error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Snapshot(err) => Some(err),
            AppError::Repository(err) => Some(err),
            AppError::Catalog(err) => Some(err),
            AppError::Animal(err) => Some(err),
            AppError::Evaluation(err) => Some(err),
            AppError::Bootstrap(err) => Some(err),
            AppError::Report(err) => Some(err),
            AppError::Export(err) => Some(err),
        }
    }
}

impl AppError {
    /// Process exit status: 2 for rejected input or unknown records, 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Evaluation(err) => match err.kind() {
                EvaluationErrorKind::Validation | EvaluationErrorKind::NotFound => 2,
                EvaluationErrorKind::Persistence => 1,
            },
            AppError::Animal(AnimalError::NotFound(_) | AnimalError::MissingField(_))
            | AppError::Report(ReportError::AnimalNotFound(_)) => 2,
            AppError::Config(_)
            | AppError::Animal(AnimalError::Repository(_))
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Snapshot(_)
            | AppError::Repository(_)
            | AppError::Catalog(_)
            | AppError::Bootstrap(_)
            | AppError::Report(_)
            | AppError::Export(_) => 1,
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Snapshot(value)
    }
}

impl From<RepositoryError> for AppError {
    fn from(value: RepositoryError) -> Self {
        Self::Repository(value)
    }
}

impl From<CatalogLoadError> for AppError {
    fn from(value: CatalogLoadError) -> Self {
        Self::Catalog(value)
    }
}

impl From<AnimalError> for AppError {
    fn from(value: AnimalError) -> Self {
        Self::Animal(value)
    }
}

impl From<EvaluationError> for AppError {
    fn from(value: EvaluationError) -> Self {
        Self::Evaluation(value)
    }
}

impl From<BootstrapError> for AppError {
    fn from(value: BootstrapError) -> Self {
        Self::Bootstrap(value)
    }
}

impl From<ReportError> for AppError {
    fn from(value: ReportError) -> Self {
        Self::Report(value)
    }
}

impl From<ExportError> for AppError {
    fn from(value: ExportError) -> Self {
        Self::Export(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::welfare::animals::AnimalId;
    use crate::welfare::catalog::QuestionId;

    #[test]
    fn rejected_input_exits_with_two() {
        let duplicate: AppError = EvaluationError::DuplicateAnswer(QuestionId(3)).into();
        assert_eq!(duplicate.exit_code(), 2);
        assert_eq!(
            duplicate.to_string(),
            "evaluation error: question 3 was answered more than once"
        );

        let missing: AppError = ReportError::AnimalNotFound(AnimalId(12)).into();
        assert_eq!(missing.exit_code(), 2);
    }

    #[test]
    fn storage_failures_exit_with_one() {
        let unavailable: AppError =
            EvaluationError::Repository(RepositoryError::Unavailable("locked".to_string())).into();
        assert_eq!(unavailable.exit_code(), 1);

        let io: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(io.exit_code(), 1);
    }
}
