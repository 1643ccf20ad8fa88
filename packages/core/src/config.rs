use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::constants::{database_file, log_file, taskdeck_dir};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid number in {var}: {source}")]
    InvalidNumber {
        var: &'static str,
        #[source]
        source: ParseIntError,
    },
    #[error("{var} must be greater than zero")]
    OutOfRange { var: &'static str },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub database_path: PathBuf,
    pub log_path: PathBuf,
    /// Fallback filter used when RUST_LOG is not set
    pub log_level: String,
    pub tick_rate: Duration,
    /// How long a status message stays in the list footer
    pub status_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_dir = env::var("TASKDECK_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| taskdeck_dir());

        let database_path = env::var("TASKDECK_DATABASE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| database_file(&data_dir));

        let log_path = env::var("TASKDECK_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| log_file(&data_dir));

        let log_level = env::var("TASKDECK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let tick_rate_ms = parse_positive("TASKDECK_TICK_RATE_MS", 250)?;
        let status_timeout_secs = parse_positive("TASKDECK_STATUS_TIMEOUT_SECS", 3)?;

        Ok(Config {
            data_dir,
            database_path,
            log_path,
            log_level,
            tick_rate: Duration::from_millis(tick_rate_ms),
            status_timeout: Duration::from_secs(status_timeout_secs),
        })
    }

    /// Override the database location (command line wins over environment)
    pub fn with_database(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.database_path = path;
        }
        self
    }

    pub fn with_log_level(mut self, level: Option<String>) -> Self {
        if let Some(level) = level {
            self.log_level = level;
        }
        self
    }
}

fn parse_positive(var: &'static str, default: u64) -> Result<u64, ConfigError> {
    let value = match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|source| ConfigError::InvalidNumber { var, source })?,
        Err(_) => default,
    };

    if value == 0 {
        return Err(ConfigError::OutOfRange { var });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serial_test::serial;
    use tempfile::TempDir;

    const VARS: &[&str] = &[
        "TASKDECK_DATA_DIR",
        "TASKDECK_DATABASE",
        "TASKDECK_LOG_FILE",
        "TASKDECK_LOG_LEVEL",
        "TASKDECK_TICK_RATE_MS",
        "TASKDECK_STATUS_TIMEOUT_SECS",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_derive_from_data_dir() {
        clear_env();
        let temp_dir = TempDir::new().unwrap();
        env::set_var("TASKDECK_DATA_DIR", temp_dir.path());

        let config = Config::from_env().unwrap();

        assert_eq!(config.database_path, temp_dir.path().join("taskdeck.db"));
        assert_eq!(config.log_path, temp_dir.path().join("taskdeck.log"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.tick_rate, Duration::from_millis(250));
        assert_eq!(config.status_timeout, Duration::from_secs(3));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_explicit_paths_and_timings() {
        clear_env();
        env::set_var("TASKDECK_DATABASE", "/tmp/other.db");
        env::set_var("TASKDECK_TICK_RATE_MS", "100");
        env::set_var("TASKDECK_STATUS_TIMEOUT_SECS", " 10 ");

        let config = Config::from_env().unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/other.db"));
        assert_eq!(config.tick_rate, Duration::from_millis(100));
        assert_eq!(config.status_timeout, Duration::from_secs(10));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_invalid_number_is_rejected() {
        clear_env();
        env::set_var("TASKDECK_TICK_RATE_MS", "fast");

        let result = Config::from_env();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidNumber {
                var: "TASKDECK_TICK_RATE_MS",
                ..
            })
        ));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_zero_tick_rate_is_rejected() {
        clear_env();
        env::set_var("TASKDECK_TICK_RATE_MS", "0");

        let result = Config::from_env();
        assert!(matches!(result, Err(ConfigError::OutOfRange { .. })));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_command_line_overrides() {
        clear_env();
        let config = Config::from_env()
            .unwrap()
            .with_database(Some(PathBuf::from("cli.db")))
            .with_log_level(None);

        assert_eq!(config.database_path, PathBuf::from("cli.db"));
        assert_eq!(config.log_level, "info");
    }
}
