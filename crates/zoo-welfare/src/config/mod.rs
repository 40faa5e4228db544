use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub storage: StorageConfig,
    pub simulation: SimulationSettings,
    pub reporting: ReportingConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let data_path = env::var("WELFARE_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("welfare-data.json"));

        let seed = match env::var("WELFARE_SIMULATION_SEED") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidSeed)?,
            ),
            _ => None,
        };

        let visit_spacing_days = env::var("WELFARE_VISIT_SPACING_DAYS")
            .unwrap_or_else(|_| "5".to_string())
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|days| *days >= 1)
            .ok_or(ConfigError::InvalidVisitSpacing)?;

        let alert_threshold = env::var("WELFARE_ALERT_THRESHOLD")
            .unwrap_or_else(|_| "75".to_string())
            .trim()
            .parse::<u8>()
            .ok()
            .filter(|threshold| *threshold <= 100)
            .ok_or(ConfigError::InvalidAlertThreshold)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            storage: StorageConfig { data_path },
            simulation: SimulationSettings {
                seed,
                visit_spacing_days,
            },
            reporting: ReportingConfig { alert_threshold },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Where the CLI keeps its store snapshot between invocations.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_path: PathBuf,
}

/// Knobs for the synthetic history generator.
#[derive(Debug, Clone)]
pub struct SimulationSettings {
    pub seed: Option<u64>,
    pub visit_spacing_days: u32,
}

#[derive(Debug, Clone)]
pub struct ReportingConfig {
    pub alert_threshold: u8,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidSeed,
    InvalidVisitSpacing,
    InvalidAlertThreshold,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSeed => write!(f, "WELFARE_SIMULATION_SEED must be a valid u64"),
            ConfigError::InvalidVisitSpacing => {
                write!(f, "WELFARE_VISIT_SPACING_DAYS must be a whole number of days >= 1")
            }
            ConfigError::InvalidAlertThreshold => {
                write!(f, "WELFARE_ALERT_THRESHOLD must be a percentage between 0 and 100")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
