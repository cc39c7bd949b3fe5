use std::env;

use crate::domain::entities::DEFAULT_POLICY_VERSION;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub policy_version: String,
    pub otel_exporter_endpoint: Option<String>,
    pub service_name: String,
    pub metrics_port: Option<u16>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://hr_calendar.db?mode=rwc".to_string());

        let database_max_connections =
            parse_max_connections(env::var("DATABASE_MAX_CONNECTIONS").ok().as_deref())?;

        let policy_version = env::var("CALENDAR_POLICY_VERSION")
            .unwrap_or_else(|_| DEFAULT_POLICY_VERSION.to_string());
        if policy_version.trim().is_empty() {
            return Err(ConfigError::EmptyPolicyVersion);
        }

        let otel_exporter_endpoint = env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok();

        let service_name = env::var("SERVICE_NAME").unwrap_or_else(|_| "hr-calendar".to_string());

        let metrics_port = match env::var("METRICS_PORT") {
            Ok(port) => Some(port.parse().map_err(|_| ConfigError::InvalidMetricsPort)?),
            Err(_) => None,
        };

        Ok(Config {
            database_url,
            database_max_connections,
            policy_version,
            otel_exporter_endpoint,
            service_name,
            metrics_port,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://hr_calendar.db?mode=rwc".to_string(),
            database_max_connections: 20,
            policy_version: DEFAULT_POLICY_VERSION.to_string(),
            otel_exporter_endpoint: None,
            service_name: "hr-calendar".to_string(),
            metrics_port: None,
        }
    }
}

/// Pool size must be a positive integer; unset means 20
fn parse_max_connections(raw: Option<&str>) -> Result<u32, ConfigError> {
    match raw {
        None => Ok(20),
        Some(value) => match value.trim().parse::<u32>() {
            Ok(0) | Err(_) => Err(ConfigError::InvalidMaxConnections(value.to_string())),
            Ok(max) => Ok(max),
        },
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DATABASE_MAX_CONNECTIONS must be a positive integer, got {0:?}")]
    InvalidMaxConnections(String),

    #[error("Invalid metrics port number")]
    InvalidMetricsPort,

    #[error("CALENDAR_POLICY_VERSION must not be empty")]
    EmptyPolicyVersion,
}
