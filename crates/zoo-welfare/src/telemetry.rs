use std::fmt;

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

use crate::config::TelemetryConfig;

/// Targets that receive the configured level; everything else stays at `warn`.
const WELFARE_TARGETS: [&str; 2] = ["zoo_welfare", "zoo_welfare_cli"];

#[derive(Debug)]
pub enum TelemetryError {
    InvalidLevel { level: String, source: ParseError },
    AlreadyInstalled(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::InvalidLevel { level, .. } => {
                write!(f, "log level '{level}' is not a valid tracing filter")
            }
            TelemetryError::AlreadyInstalled(err) => {
                write!(f, "a global subscriber is already installed: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::InvalidLevel { source, .. } => Some(source),
            TelemetryError::AlreadyInstalled(err) => Some(&**err),
        }
    }
}

/// Filter used when `RUST_LOG` is unset: the configured level for the welfare crates only.
pub fn default_filter(level: &str) -> Result<EnvFilter, TelemetryError> {
    let level = level.trim();
    let directives = std::iter::once("warn".to_string())
        .chain(
            WELFARE_TARGETS
                .iter()
                .map(|target| format!("{target}={level}")),
        )
        .collect::<Vec<_>>()
        .join(",");

    EnvFilter::try_new(directives).map_err(|source| TelemetryError::InvalidLevel {
        level: level.to_string(),
        source,
    })
}

/// Installs the global fmt subscriber on stderr so report and export output on stdout stays
/// clean. `RUST_LOG` replaces the configured level entirely.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => default_filter(&config.log_level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::AlreadyInstalled)
}
