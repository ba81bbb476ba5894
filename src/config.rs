use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::shared::utils::RetryPolicy;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    pub db_max_connections: u32,
    pub retry_max_attempts: u32,
    pub retry_base_delay_ms: u64,
    pub otel_exporter_endpoint: Option<String>,
    pub service_name: String,
    pub metrics_enabled: bool,
    pub metrics_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup; unset keys take their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .unwrap_or_else(|| "sqlite://db.sqlite3?mode=rwc".to_string());

        let server_host = lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let otel_exporter_endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|v| !v.is_empty());

        let service_name = lookup("SERVICE_NAME").unwrap_or_else(|| "lucky".to_string());

        let metrics_enabled = match lookup("METRICS_ENABLED") {
            None => false,
            Some(value) => parse_flag(&value).ok_or(ConfigError::Invalid {
                key: "METRICS_ENABLED",
                value,
            })?,
        };

        Ok(Config {
            database_url,
            server_host,
            server_port: parse_or(&lookup, "SERVER_PORT", 8000)?,
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 5)?,
            retry_max_attempts: parse_or(&lookup, "RETRY_MAX_ATTEMPTS", 4)?,
            retry_base_delay_ms: parse_or(&lookup, "RETRY_BASE_DELAY_MS", 100)?,
            otel_exporter_endpoint,
            service_name,
            metrics_enabled,
            metrics_port: parse_or(&lookup, "METRICS_PORT", 9000)?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry_max_attempts,
            Duration::from_millis(self.retry_base_delay_ms),
        )
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}
