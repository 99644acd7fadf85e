use std::env;
use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_COMPANY: &str = "Aloma DISTRIBUIDORES OFICIALES";

/// Distinguishes runtime behavior for different stages of the tool.
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
    pub activity: ActivitySourcesConfig,
    pub daily: DailySourcesConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let company = env::var("ACTIVITY_COMPANY").unwrap_or_else(|_| DEFAULT_COMPANY.to_string());
        if company.trim().is_empty() {
            return Err(ConfigError::BlankCompany);
        }

        let roster_path = path_var("ACTIVITY_ROSTER_PATH", "General.xlsx");
        let visits_path = path_var("ACTIVITY_VISITS_PATH", "visitas_aloma_2025_12.xlsx");
        let off_route_path = path_var(
            "ACTIVITY_OFF_ROUTE_PATH",
            "fuera_de_ruta_aloma_2025_12.xlsx",
        );
        let data_dir = path_var("DAILY_DATA_DIR", "data");

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            activity: ActivitySourcesConfig {
                company,
                roster_path,
                visits_path,
                off_route_path,
            },
            daily: DailySourcesConfig { data_dir },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

fn path_var(key: &str, default: &str) -> PathBuf {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(default))
}

/// Inputs for the monthly roster reconciliation.
#[derive(Debug, Clone)]
pub struct ActivitySourcesConfig {
    pub company: String,
    pub roster_path: PathBuf,
    pub visits_path: PathBuf,
    pub off_route_path: PathBuf,
}

/// Location of the per-distributor daily activity workbooks.
#[derive(Debug, Clone)]
pub struct DailySourcesConfig {
    pub data_dir: PathBuf,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    BlankCompany,
    EmptyDataDirectory { path: PathBuf },
    UnknownDataFile { name: String, available: Vec<String> },
    UnreadableDataDirectory { path: PathBuf, source: std::io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BlankCompany => write!(f, "ACTIVITY_COMPANY must not be blank"),
            ConfigError::EmptyDataDirectory { path } => {
                write!(f, "no spreadsheet files in {}", path.display())
            }
            ConfigError::UnknownDataFile { name, available } => write!(
                f,
                "data file '{}' not found (available: {})",
                name,
                available.join(", ")
            ),
            ConfigError::UnreadableDataDirectory { path, .. } => {
                write!(f, "unable to read data directory {}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::UnreadableDataDirectory { source, .. } => Some(source),
            _ => None,
        }
    }
}
