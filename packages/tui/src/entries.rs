// ABOUTME: List entry wrappers for boards, tags and items
// ABOUTME: Decide what each view shows as title, description and footer

use taskdeck_core::{Board, Item};

use crate::list::ListEntry;

/// An entry a menu can act on; `key` identifies it across reloads
pub trait MenuEntry: ListEntry + Clone + std::fmt::Debug + Send + Sync + 'static {
    fn key(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardEntry {
    pub board: Board,
}

impl BoardEntry {
    pub fn new(board: Board) -> Self {
        Self { board }
    }
}

impl ListEntry for BoardEntry {
    fn title(&self) -> &str {
        &self.board.name
    }

    fn description(&self) -> String {
        self.board.created_at.format("%m-%d-%Y %H:%M").to_string()
    }
}

impl MenuEntry for BoardEntry {
    fn key(&self) -> &str {
        &self.board.id
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TagEntry {
    pub tag: String,
    pub count: usize,
}

impl TagEntry {
    pub fn new(tag: impl Into<String>, count: usize) -> Self {
        Self {
            tag: tag.into(),
            count,
        }
    }
}

impl ListEntry for TagEntry {
    fn title(&self) -> &str {
        &self.tag
    }

    fn description(&self) -> String {
        match self.count {
            1 => "1 item".to_string(),
            n => format!("{} items", n),
        }
    }
}

impl MenuEntry for TagEntry {
    fn key(&self) -> &str {
        &self.tag
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemEntry {
    pub item: Item,
}

impl ItemEntry {
    pub fn new(item: Item) -> Self {
        Self { item }
    }
}

impl ListEntry for ItemEntry {
    fn title(&self) -> &str {
        &self.item.title
    }

    fn description(&self) -> String {
        self.item.description.clone()
    }

    /// Completed items are the ones hidden by `h`
    fn hide_value(&self) -> bool {
        self.item.completed
    }

    fn footer(&self) -> Option<String> {
        if self.item.tags.is_empty() {
            Some("No tags".to_string())
        } else {
            Some(format!("Tags: {}", self.item.tags.join(", ")))
        }
    }
}

impl MenuEntry for ItemEntry {
    fn key(&self) -> &str {
        &self.item.id
    }
}
