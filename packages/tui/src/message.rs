// ABOUTME: Messages processed by App::update and the navigation vocabulary
// ABOUTME: Async results carry the ViewId of the menu that issued them

use crossterm::event::KeyEvent;
use std::fmt;
use taskdeck_service::ServiceResult;

use crate::entries::{BoardEntry, ItemEntry, TagEntry};
use crate::list::StatusMessage;

/// Identity of one menu instance. Re-opening a detail view allocates a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u64);

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum View {
    Boards,
    Tags,
    ItemsByBoard,
    ItemsByTag,
}

impl View {
    pub fn is_root(self) -> bool {
        matches!(self, View::Boards | View::Tags)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    SwitchRoot(View),
    OpenBoardItems,
    OpenTagItems,
    Back,
    BoardDelta(isize),
    TagDelta(isize),
}

/// Which edit produced a save result
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SaveAction {
    Rename,
    Tags,
    Toggle,
}

/// Results delivered to a single menu
#[derive(Debug)]
pub enum MenuEvent<E> {
    Loaded(ServiceResult<Vec<E>>),
    Created(ServiceResult<E>),
    Saved {
        action: SaveAction,
        result: ServiceResult<E>,
    },
    Deleted {
        label: String,
        result: ServiceResult<()>,
    },
    Status(StatusMessage),
}

#[derive(Debug)]
pub enum Message {
    Key(KeyEvent),
    Resize { width: u16, height: u16 },
    Tick,
    Navigate(Navigation),
    Quit,
    Boards(ViewId, MenuEvent<BoardEntry>),
    Tags(ViewId, MenuEvent<TagEntry>),
    Items(ViewId, MenuEvent<ItemEntry>),
}
