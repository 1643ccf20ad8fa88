// ABOUTME: Generic filterable list with a selection cursor and hide toggle
// ABOUTME: Knows nothing about boards or items; entries implement ListEntry

use crossterm::event::{KeyCode, KeyEvent};
use std::time::{Duration, Instant};

use crate::input::InputBuffer;

/// What a list needs to know about an entry
pub trait ListEntry {
    fn title(&self) -> &str;
    fn description(&self) -> String;

    /// Text matched by the filter
    fn filter_value(&self) -> &str {
        self.title()
    }

    /// Entries returning true disappear while hiding is on
    fn hide_value(&self) -> bool {
        false
    }

    /// Extra line shown under the description
    fn footer(&self) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum FilterState {
    #[default]
    Unfiltered,
    Filtering,
    FilterApplied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    created_at: Instant,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Info,
            created_at: Instant::now(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: StatusLevel::Error,
            created_at: Instant::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == StatusLevel::Error
    }

    pub fn is_expired(&self, now: Instant, lifetime: Duration) -> bool {
        now.saturating_duration_since(self.created_at) >= lifetime
    }
}

/// Ordered entries plus the derived visible subset.
///
/// The cursor always indexes into the visible subset; the visible subset is
/// the filtered entries minus the hidden ones.
#[derive(Debug, Clone)]
pub struct ItemList<E> {
    title: String,
    items: Vec<E>,
    visible: Vec<usize>,
    cursor: usize,
    filter_state: FilterState,
    filter: InputBuffer,
    hiding: bool,
    status: Option<StatusMessage>,
}

impl<E: ListEntry> ItemList<E> {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
            visible: Vec::new(),
            cursor: 0,
            filter_state: FilterState::Unfiltered,
            filter: InputBuffer::new(),
            hiding: false,
            status: None,
        }
    }

    pub fn with_items(title: impl Into<String>, items: Vec<E>) -> Self {
        let mut list = Self::new(title);
        list.set_items(items);
        list
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Every entry, ignoring filter and hide state
    pub fn items(&self) -> &[E] {
        &self.items
    }

    pub fn visible_items(&self) -> Vec<&E> {
        self.visible.iter().map(|&i| &self.items[i]).collect()
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Cursor position within the visible subset
    pub fn index(&self) -> Option<usize> {
        if self.visible.is_empty() {
            None
        } else {
            Some(self.cursor)
        }
    }

    pub fn selected(&self) -> Option<&E> {
        self.visible.get(self.cursor).map(|&i| &self.items[i])
    }

    pub fn select(&mut self, index: usize) {
        if !self.visible.is_empty() {
            self.cursor = index.min(self.visible.len() - 1);
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.visible.len() {
            self.cursor += 1;
        }
    }

    pub fn page_up(&mut self, page: usize) {
        self.cursor = self.cursor.saturating_sub(page.max(1));
    }

    pub fn page_down(&mut self, page: usize) {
        let last = self.visible.len().saturating_sub(1);
        self.cursor = (self.cursor + page.max(1)).min(last);
    }

    pub fn select_first(&mut self) {
        self.cursor = 0;
    }

    pub fn select_last(&mut self) {
        self.cursor = self.visible.len().saturating_sub(1);
    }

    /// Replace every entry; keeps the cursor position where possible
    pub fn set_items(&mut self, items: Vec<E>) {
        self.items = items;
        self.refresh_visible(None);
    }

    /// Append an entry and move the cursor to it if it is visible
    pub fn insert_item(&mut self, entry: E) {
        self.items.push(entry);
        let inserted = self.items.len() - 1;
        self.refresh_visible(Some(inserted));
    }

    /// Replace the first entry matching `pred`. Returns false if none matched.
    pub fn replace_where<F>(&mut self, pred: F, entry: E) -> bool
    where
        F: Fn(&E) -> bool,
    {
        match self.items.iter().position(pred) {
            Some(index) => {
                self.items[index] = entry;
                let selected = self.visible.get(self.cursor).copied();
                self.refresh_visible(selected);
                true
            }
            None => false,
        }
    }

    /// Replace the selected entry in place
    pub fn set_selected(&mut self, entry: E) -> bool {
        match self.visible.get(self.cursor).copied() {
            Some(index) => {
                self.items[index] = entry;
                self.refresh_visible(Some(index));
                true
            }
            None => false,
        }
    }

    pub fn filter_state(&self) -> FilterState {
        self.filter_state
    }

    pub fn filter_text(&self) -> &str {
        self.filter.content()
    }

    pub fn filter_input(&self) -> &InputBuffer {
        &self.filter
    }

    /// True while the user is typing a filter
    pub fn is_filtering(&self) -> bool {
        self.filter_state == FilterState::Filtering
    }

    pub fn start_filtering(&mut self) {
        self.filter_state = FilterState::Filtering;
        self.filter.clear();
        self.refresh_visible(None);
    }

    pub fn can_accept_filter(&self) -> bool {
        self.is_filtering() && !self.filter.is_empty()
    }

    /// Fix the current filter. Refused while the staged text is empty.
    pub fn accept_filter(&mut self) -> bool {
        if !self.can_accept_filter() {
            return false;
        }
        self.filter_state = FilterState::FilterApplied;
        true
    }

    /// Drop any filter and show the full set again
    pub fn cancel_filter(&mut self) {
        self.filter_state = FilterState::Unfiltered;
        self.filter.clear();
        self.refresh_visible(None);
    }

    /// Apply a filter directly, skipping the typing phase
    pub fn set_filter_text(&mut self, text: &str) {
        self.filter.set(text);
        self.filter_state = if text.is_empty() {
            FilterState::Unfiltered
        } else {
            FilterState::FilterApplied
        };
        self.refresh_visible(None);
    }

    /// Handle a key while filtering. Returns true when the key was used.
    pub fn handle_filter_key(&mut self, key: &KeyEvent) -> bool {
        if !self.is_filtering() {
            return false;
        }

        match key.code {
            KeyCode::Esc => self.cancel_filter(),
            KeyCode::Enter => {
                self.accept_filter();
            }
            KeyCode::Up => self.cursor_up(),
            KeyCode::Down => self.cursor_down(),
            _ => {
                if self.filter.handle_key(key) {
                    self.refresh_visible(None);
                } else {
                    return false;
                }
            }
        }
        true
    }

    pub fn is_hiding(&self) -> bool {
        self.hiding
    }

    pub fn toggle_hide(&mut self) {
        self.hiding = !self.hiding;
        self.refresh_visible(None);
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn set_status(&mut self, status: StatusMessage) {
        self.status = Some(status);
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Drop the status message once it has been shown for `lifetime`
    pub fn expire_status(&mut self, now: Instant, lifetime: Duration) {
        if self
            .status
            .as_ref()
            .is_some_and(|status| status.is_expired(now, lifetime))
        {
            self.status = None;
        }
    }

    fn matches(&self, entry: &E) -> bool {
        if self.hiding && entry.hide_value() {
            return false;
        }
        if self.filter_state == FilterState::Unfiltered || self.filter.is_empty() {
            return true;
        }
        entry
            .filter_value()
            .to_lowercase()
            .contains(&self.filter.content().to_lowercase())
    }

    /// Recompute the visible subset, following `focus` (an index into
    /// `items`) or else the previously selected entry.
    fn refresh_visible(&mut self, focus: Option<usize>) {
        let previous = focus.or_else(|| self.visible.get(self.cursor).copied());

        self.visible = (0..self.items.len())
            .filter(|&i| self.matches(&self.items[i]))
            .collect();

        let followed = previous.and_then(|p| self.visible.iter().position(|&i| i == p));
        self.cursor = match followed {
            Some(position) => position,
            None => self.cursor.min(self.visible.len().saturating_sub(1)),
        };
    }
}
