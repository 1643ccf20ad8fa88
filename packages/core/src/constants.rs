use std::env;
use std::path::PathBuf;

/// Name of the per-user data directory under the home directory
pub const DATA_DIR_NAME: &str = ".taskdeck";

/// Get the path to the Taskdeck directory (~/.taskdeck)
pub fn taskdeck_dir() -> PathBuf {
    // First try HOME environment variable (useful for tests)
    if let Ok(home) = env::var("HOME") {
        PathBuf::from(home).join(DATA_DIR_NAME)
    } else {
        // Fall back to dirs crate, then the working directory
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DATA_DIR_NAME)
    }
}

/// Default database location inside a data directory
pub fn database_file(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join("taskdeck.db")
}

/// Default log file location inside a data directory
pub fn log_file(data_dir: &std::path::Path) -> PathBuf {
    data_dir.join("taskdeck.log")
}
