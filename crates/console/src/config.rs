//! # Console Configuration Module
//!
//! Loads settings for the console application. Sources are layered, later ones
//! winning:
//!
//! 1. `appsettings.json`
//! 2. `appsettings.{CALENDAR_ENVIRONMENT}.json`
//! 3. `CALENDAR_*` environment variables
//! 4. `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS` and `LOG_LEVEL`
//!
//! ## Environment Variables
//!
//! - `CALENDAR_ENVIRONMENT`: Selects the environment-specific settings file
//! - `CALENDAR_IN_MEMORY`: Keep everything in memory instead of PostgreSQL (default: false)
//! - `CALENDAR_DEFAULT_DURATION_MINUTES`: Duration used when none is given (default: 30)
//! - `DATABASE_URL`: PostgreSQL connection string (required unless in memory)
//! - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 5)
//! - `LOG_LEVEL`: Logging level (default: "info")

use std::env;
use std::path::Path;

use calendar_scheduler::config::SchedulerConfig;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use eyre::{eyre, Result, WrapErr};
use serde::Deserialize;
use tracing::Level;

const SETTINGS_FILE: &str = "appsettings";

/// Configuration for the console application
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// PostgreSQL connection string, unused when `in_memory` is set
    pub database_url: Option<String>,

    /// Use the in-memory store; nothing survives the process
    pub in_memory: bool,

    /// Log level for the application
    pub log_level: Level,

    /// Maximum size of the database connection pool
    pub max_connections: u32,

    /// Engine defaults
    pub scheduler: SchedulerConfig,
}

/// Flat shape shared by the settings files and the environment.
#[derive(Debug, Deserialize)]
struct Settings {
    database_url: Option<String>,
    #[serde(default)]
    in_memory: bool,
    #[serde(default = "default_log_level")]
    log_level: String,
    #[serde(default = "default_max_connections")]
    max_connections: u32,
    #[serde(flatten)]
    scheduler: SchedulerConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl ConsoleConfig {
    /// Loads configuration from the working directory's settings files and
    /// the process environment.
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - A settings file exists but cannot be parsed
    /// - A value has the wrong type (e.g. a non-numeric pool size)
    /// - Neither `DATABASE_URL` nor `CALENDAR_IN_MEMORY` is set
    pub fn from_env() -> Result<Self> {
        let environment = env::var("CALENDAR_ENVIRONMENT").ok();

        let builder = settings_files(Path::new("."), environment.as_deref())
            .add_source(Environment::with_prefix("CALENDAR").try_parsing(true))
            .set_override_option("database_url", env::var("DATABASE_URL").ok())?
            .set_override_option("log_level", env::var("LOG_LEVEL").ok())?
            .set_override_option(
                "max_connections",
                env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .map(|value| value.parse::<u32>())
                    .transpose()
                    .wrap_err("Invalid DATABASE_MAX_CONNECTIONS value")?
                    .map(i64::from),
            )?;

        Self::from_builder(builder)
    }

    /// Loads configuration from the settings files in `dir` only.
    pub fn from_files(dir: &Path, environment: Option<&str>) -> Result<Self> {
        Self::from_builder(settings_files(dir, environment))
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        let settings: Settings = builder
            .build()
            .wrap_err("Failed to read configuration")?
            .try_deserialize()
            .wrap_err("Invalid configuration")?;

        if settings.database_url.is_none() && !settings.in_memory {
            return Err(eyre!("DATABASE_URL must be set unless CALENDAR_IN_MEMORY is enabled"));
        }

        Ok(Self {
            database_url: settings.database_url,
            in_memory: settings.in_memory,
            log_level: parse_level(&settings.log_level),
            max_connections: settings.max_connections,
            scheduler: settings.scheduler,
        })
    }
}

fn settings_files(dir: &Path, environment: Option<&str>) -> ConfigBuilder<DefaultState> {
    let mut builder =
        Config::builder().add_source(File::from(dir.join(format!("{SETTINGS_FILE}.json"))).required(false));

    if let Some(environment) = environment {
        builder = builder
            .add_source(File::from(dir.join(format!("{SETTINGS_FILE}.{environment}.json"))).required(false));
    }

    builder
}

fn parse_level(level: &str) -> Level {
    match level.to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_level_falls_back_to_info() {
        assert_eq!(parse_level("verbose"), Level::INFO);
        assert_eq!(parse_level("WARN"), Level::WARN);
    }
}
