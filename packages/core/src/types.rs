// ABOUTME: Domain type definitions for boards and items
// ABOUTME: Includes the clipboard interchange record for a single item

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named collection of items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// A task that belongs to exactly one board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    /// Owning board, never changes after creation
    pub board_id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    /// Trimmed, non-empty and unique; kept in insertion order
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Item {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Portable form of an item used for copy and paste.
///
/// Carries only user-editable fields so a pasted draft always becomes a
/// fresh item on the target board.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<&Item> for ItemDraft {
    fn from(item: &Item) -> Self {
        Self {
            title: item.title.clone(),
            description: item.description.clone(),
            completed: item.completed,
            tags: item.tags.clone(),
        }
    }
}
