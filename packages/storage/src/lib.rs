// ABOUTME: Storage gateway for boards, items and tag memberships
// ABOUTME: Defines the gateway trait, its error type, and the SQLite implementation

use thiserror::Error;

pub mod gateway;
pub mod sqlite;

pub use gateway::StorageGateway;
pub use sqlite::SqliteStorage;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database error: {0}")]
    Database(String),
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
}

impl StorageError {
    pub(crate) fn board_not_found(id: &str) -> Self {
        StorageError::NotFound {
            entity: "board",
            id: id.to_string(),
        }
    }

    pub(crate) fn item_not_found(id: &str) -> Self {
        StorageError::NotFound {
            entity: "item",
            id: id.to_string(),
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;
