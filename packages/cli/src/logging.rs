// ABOUTME: File-based tracing setup for the taskdeck binary
// ABOUTME: The terminal belongs to the UI, so log lines go to the configured log file

use anyhow::{anyhow, Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use taskdeck_core::Config;
use tracing_subscriber::EnvFilter;

/// RUST_LOG wins when set, otherwise the configured level applies
pub fn filter_directive(rust_log: Option<String>, level: &str) -> String {
    match rust_log {
        Some(directive) if !directive.trim().is_empty() => directive,
        _ => level.to_string(),
    }
}

pub fn init_file_logging(config: &Config) -> Result<()> {
    if let Some(parent) = config.log_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
        }
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_path)
        .with_context(|| format!("Failed to open log file {}", config.log_path.display()))?;

    let directive = filter_directive(std::env::var("RUST_LOG").ok(), &config.log_level);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rust_log_overrides_level() {
        assert_eq!(
            filter_directive(Some("taskdeck_tui=debug".to_string()), "info"),
            "taskdeck_tui=debug"
        );
    }

    #[test]
    fn test_configured_level_is_fallback() {
        assert_eq!(filter_directive(None, "warn"), "warn");
        assert_eq!(filter_directive(Some("  ".to_string()), "warn"), "warn");
    }
}
