// ABOUTME: Core types, paths, and configuration for Taskdeck
// ABOUTME: Foundational package shared by storage, service, tui and cli

pub mod config;
pub mod constants;
pub mod types;

// Re-export main types
pub use types::{Board, Item, ItemDraft};

// Re-export constants
pub use constants::{database_file, log_file, taskdeck_dir, DATA_DIR_NAME};

// Re-export configuration
pub use config::{Config, ConfigError};
