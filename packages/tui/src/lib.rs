//! Taskdeck TUI - Terminal User Interface for Taskdeck
//!
//! Boards, tags and items are browsed through one generic list controller
//! (`menu::Menu`). `App` routes keys and async results between the views;
//! all I/O runs as `Command` futures whose results come back as `Message`s.

pub mod app;
pub mod clipboard;
pub mod command;
pub mod entries;
pub mod events;
pub mod input;
pub mod keymap;
pub mod list;
pub mod menu;
pub mod message;
pub mod ui;

pub use app::App;
pub use clipboard::{Clipboard, ClipboardError, MemoryClipboard, SystemClipboard};
pub use command::Command;
pub use message::{Message, Navigation, View, ViewId};
