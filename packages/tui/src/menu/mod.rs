// ABOUTME: Generic view controller shared by the boards, tags and item views
// ABOUTME: Owns the list, the input sub-state machine and async command issuing

mod kinds;

pub use kinds::{BoardsKind, ItemsKind, ItemsScope, TagsKind};

use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::{Duration, Instant};
use taskdeck_core::ItemDraft;
use taskdeck_service::{extract_tags, BoardService, ServiceError, ServiceResult};
use tracing::{debug, warn};

use crate::clipboard::Clipboard;
use crate::command::Command;
use crate::entries::MenuEntry;
use crate::input::InputBuffer;
use crate::list::{FilterState, ItemList, ListEntry, StatusMessage};
use crate::message::{MenuEvent, Message, Navigation, SaveAction, View, ViewId};

/// Which edits a kind supports; unsupported keys report a status instead
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub create: bool,
    pub rename: bool,
    /// Create and rename also prompt for a description
    pub describe: bool,
    pub update_tags: bool,
    pub toggle_complete: bool,
    pub paste: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum InputState {
    #[default]
    Default,
    CreateName,
    CreateDescription,
    RenameName,
    RenameDescription,
    UpdateTags,
}

/// What a menu is a list of, and how it talks to the service
#[async_trait]
pub trait MenuKind: Clone + Send + Sync + 'static {
    type Entry: MenuEntry;

    fn view(&self) -> View;
    fn title(&self) -> String;
    /// Singular name used in status messages
    fn noun(&self) -> &'static str;
    fn capabilities(&self) -> Capabilities;
    fn wrap(id: ViewId, event: MenuEvent<Self::Entry>) -> Message;
    fn navigation(&self, key: &KeyEvent, filter: FilterState) -> Option<Navigation>;

    async fn load(&self, service: &BoardService) -> ServiceResult<Vec<Self::Entry>>;
    async fn delete(&self, service: &BoardService, entry: Self::Entry) -> ServiceResult<()>;
    /// Clipboard text for `y`
    async fn export(&self, service: &BoardService, entry: Self::Entry) -> ServiceResult<String>;

    async fn create(
        &self,
        _service: &BoardService,
        _name: String,
        _description: String,
    ) -> ServiceResult<Self::Entry> {
        Err(unsupported(self.noun(), "created"))
    }

    async fn save(
        &self,
        _service: &BoardService,
        _entry: Self::Entry,
    ) -> ServiceResult<Self::Entry> {
        Err(unsupported(self.noun(), "edited"))
    }

    async fn paste(
        &self,
        _service: &BoardService,
        _draft: ItemDraft,
    ) -> ServiceResult<Self::Entry> {
        Err(unsupported(self.noun(), "pasted here"))
    }

    fn renamed(&self, entry: &Self::Entry, _name: String, _description: String) -> Self::Entry {
        entry.clone()
    }

    fn tags(&self, _entry: &Self::Entry) -> Vec<String> {
        Vec::new()
    }

    fn with_tags(&self, entry: &Self::Entry, _tags: Vec<String>) -> Self::Entry {
        entry.clone()
    }

    fn toggled(&self, entry: &Self::Entry) -> Self::Entry {
        entry.clone()
    }

    /// Clipboard text written just before the entry is deleted
    fn delete_snapshot(&self, _entry: &Self::Entry) -> Option<String> {
        None
    }
}

fn unsupported(noun: &str, action: &str) -> ServiceError {
    ServiceError::validation(format!("a {} cannot be {}", noun, action))
}

/// Pending edit: the entry being changed and the name typed so far
#[derive(Debug, Clone)]
struct InputContext<E> {
    state: InputState,
    target: Option<E>,
    name: String,
}

impl<E> Default for InputContext<E> {
    fn default() -> Self {
        Self {
            state: InputState::Default,
            target: None,
            name: String::new(),
        }
    }
}

pub struct Menu<K: MenuKind> {
    id: ViewId,
    kind: K,
    service: Arc<BoardService>,
    clipboard: Arc<dyn Clipboard>,
    list: ItemList<K::Entry>,
    input: InputBuffer,
    context: InputContext<K::Entry>,
    size: Option<(u16, u16)>,
    show_help: bool,
}

impl<K: MenuKind> Menu<K> {
    pub fn new(
        id: ViewId,
        kind: K,
        service: Arc<BoardService>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        let list = ItemList::new(kind.title());
        Self {
            id,
            kind,
            service,
            clipboard,
            list,
            input: InputBuffer::new(),
            context: InputContext::default(),
            size: None,
            show_help: false,
        }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn kind(&self) -> &K {
        &self.kind
    }

    pub fn view(&self) -> View {
        self.kind.view()
    }

    pub fn list(&self) -> &ItemList<K::Entry> {
        &self.list
    }

    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    pub fn input_state(&self) -> InputState {
        self.context.state
    }

    pub fn size(&self) -> Option<(u16, u16)> {
        self.size
    }

    pub fn show_help(&self) -> bool {
        self.show_help
    }

    pub fn selected(&self) -> Option<&K::Entry> {
        self.list.selected()
    }

    /// No edit in progress and no filter being typed
    pub fn is_idle(&self) -> bool {
        self.context.state == InputState::Default && !self.list.is_filtering()
    }

    pub fn select(&mut self, index: usize) {
        self.list.select(index);
    }

    /// Prompt shown above the input line
    pub fn prompt(&self) -> Option<String> {
        let noun = self.kind.noun();
        match self.context.state {
            InputState::Default => None,
            InputState::CreateName => Some(format!("New {} name", noun)),
            InputState::RenameName => Some(format!("Rename {}", noun)),
            InputState::CreateDescription | InputState::RenameDescription => {
                Some("Description".to_string())
            }
            InputState::UpdateTags => Some("Tags (comma separated)".to_string()),
        }
    }

    /// Fetch every entry from the service
    pub fn init(&self) -> Command {
        self.load()
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.size = Some((width, height));
    }

    pub fn tick(&mut self, now: Instant, status_timeout: Duration) {
        self.list.expire_status(now, status_timeout);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Command {
        if self.context.state != InputState::Default {
            return self.handle_input_key(key);
        }

        if self.list.is_filtering() {
            self.list.handle_filter_key(&key);
            return Command::None;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return Command::None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return Command::None;
        }

        if let Some(navigation) = self.kind.navigation(&key, self.list.filter_state()) {
            return Command::message(Message::Navigate(navigation));
        }

        let caps = self.kind.capabilities();
        match key.code {
            KeyCode::Char('q') => Command::message(Message::Quit),
            KeyCode::Char('?') => {
                self.show_help = true;
                Command::None
            }
            KeyCode::Esc => {
                if self.list.filter_state() == FilterState::FilterApplied {
                    self.list.cancel_filter();
                }
                Command::None
            }
            KeyCode::Char('/') => {
                self.list.start_filtering();
                Command::None
            }
            KeyCode::Char('h') => {
                self.list.toggle_hide();
                Command::None
            }
            KeyCode::Char('R') => self.load(),
            KeyCode::Char('a') if caps.create => {
                self.begin_input(InputState::CreateName, None, String::new());
                Command::None
            }
            KeyCode::Char('r') if caps.rename => self.begin_rename(),
            KeyCode::Char('t') if caps.update_tags => self.begin_tags(),
            KeyCode::Char('d') => self.delete_selected(),
            KeyCode::Char(' ') if caps.toggle_complete => self.toggle_selected(),
            KeyCode::Char('y') => self.copy_selected(),
            KeyCode::Char('p') if caps.paste => self.paste(),
            KeyCode::Up | KeyCode::Char('k') => {
                self.list.cursor_up();
                Command::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.list.cursor_down();
                Command::None
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.list.select_first();
                Command::None
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.list.select_last();
                Command::None
            }
            KeyCode::PageUp => {
                self.list.page_up(self.page_size());
                Command::None
            }
            KeyCode::PageDown => {
                self.list.page_down(self.page_size());
                Command::None
            }
            _ => Command::None,
        }
    }

    /// Apply a result issued by this menu
    pub fn apply(&mut self, event: MenuEvent<K::Entry>) -> Command {
        match event {
            MenuEvent::Loaded(Ok(entries)) => {
                debug!("{} loaded {} entries", self.id, entries.len());
                self.list.set_items(entries);
                Command::None
            }
            MenuEvent::Loaded(Err(err)) => {
                self.report(&err);
                Command::None
            }
            MenuEvent::Created(Ok(entry)) => {
                self.list
                    .set_status(StatusMessage::info(format!("created \"{}\"", entry.title())));
                self.list.insert_item(entry);
                Command::None
            }
            MenuEvent::Created(Err(err)) => {
                self.report(&err);
                Command::None
            }
            MenuEvent::Saved { result: Ok(entry), .. } => {
                let key = entry.key().to_string();
                self.list.replace_where(|e| e.key() == key, entry);
                Command::None
            }
            MenuEvent::Saved { action, result: Err(err) } => {
                debug!("{} save failed for {}", self.id, action);
                self.report(&err);
                Command::None
            }
            MenuEvent::Deleted { label, result } => {
                match result {
                    Ok(()) => self
                        .list
                        .set_status(StatusMessage::info(format!("deleted \"{}\"", label))),
                    Err(err) => self.report(&err),
                }
                // Refresh whatever the outcome
                self.load()
            }
            MenuEvent::Status(status) => {
                self.list.set_status(status);
                Command::None
            }
        }
    }

    fn report(&mut self, err: &ServiceError) {
        warn!("{}: {}", self.id, err);
        self.list.set_status(StatusMessage::error(err.to_string()));
    }

    fn no_selection(&mut self) -> Command {
        self.list
            .set_status(StatusMessage::error(format!("no {} selected", self.kind.noun())));
        Command::None
    }

    fn page_size(&self) -> usize {
        // Title, input line and status take four rows; an entry takes three
        self.size
            .map(|(_, height)| (height.saturating_sub(4) / 3) as usize)
            .unwrap_or(1)
            .max(1)
    }

    fn load(&self) -> Command {
        let (id, kind, service) = (self.id, self.kind.clone(), self.service.clone());
        Command::perform(async move {
            let result = kind.load(&service).await;
            K::wrap(id, MenuEvent::Loaded(result))
        })
    }

    fn begin_input(&mut self, state: InputState, target: Option<K::Entry>, prefill: String) {
        self.context.state = state;
        self.context.target = target;
        self.input.set(prefill);
    }

    fn finish_input(&mut self) -> InputContext<K::Entry> {
        self.input.clear();
        std::mem::take(&mut self.context)
    }

    fn begin_rename(&mut self) -> Command {
        match self.list.selected().cloned() {
            Some(entry) => {
                let title = entry.title().to_string();
                self.begin_input(InputState::RenameName, Some(entry), title);
                Command::None
            }
            None => self.no_selection(),
        }
    }

    fn begin_tags(&mut self) -> Command {
        match self.list.selected().cloned() {
            Some(entry) => {
                let prefill = self.kind.tags(&entry).join(", ");
                self.begin_input(InputState::UpdateTags, Some(entry), prefill);
                Command::None
            }
            None => self.no_selection(),
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> Command {
        match key.code {
            KeyCode::Esc => {
                self.finish_input();
                Command::None
            }
            KeyCode::Enter => self.submit_input(),
            _ => {
                self.input.handle_key(&key);
                Command::None
            }
        }
    }

    fn submit_input(&mut self) -> Command {
        let describe = self.kind.capabilities().describe;
        let value = self.input.take();

        match self.context.state {
            InputState::Default => Command::None,
            InputState::CreateName if describe => {
                self.context.name = value;
                self.context.state = InputState::CreateDescription;
                Command::None
            }
            InputState::CreateName => {
                self.finish_input();
                self.create(value, String::new())
            }
            InputState::CreateDescription => {
                let context = self.finish_input();
                self.create(context.name, value)
            }
            InputState::RenameName if describe => {
                let description = self
                    .context
                    .target
                    .as_ref()
                    .map(|entry| entry.description())
                    .unwrap_or_default();
                self.context.name = value;
                self.context.state = InputState::RenameDescription;
                self.input.set(description);
                Command::None
            }
            InputState::RenameName => {
                let context = self.finish_input();
                match context.target {
                    Some(entry) => {
                        let renamed = self.kind.renamed(&entry, value, String::new());
                        self.save(SaveAction::Rename, renamed)
                    }
                    None => self.no_selection(),
                }
            }
            InputState::RenameDescription => {
                let context = self.finish_input();
                match context.target {
                    Some(entry) => {
                        let renamed = self.kind.renamed(&entry, context.name, value);
                        self.save(SaveAction::Rename, renamed)
                    }
                    None => self.no_selection(),
                }
            }
            InputState::UpdateTags => {
                let context = self.finish_input();
                let Some(entry) = context.target else {
                    return self.no_selection();
                };
                match extract_tags(&value) {
                    Ok(tags) => {
                        let updated = self.kind.with_tags(&entry, tags);
                        self.save(SaveAction::Tags, updated)
                    }
                    Err(err) => {
                        self.list.set_status(StatusMessage::error(err.to_string()));
                        Command::None
                    }
                }
            }
        }
    }

    fn create(&self, name: String, description: String) -> Command {
        let (id, kind, service) = (self.id, self.kind.clone(), self.service.clone());
        Command::perform(async move {
            let result = kind.create(&service, name, description).await;
            K::wrap(id, MenuEvent::Created(result))
        })
    }

    fn save(&self, action: SaveAction, entry: K::Entry) -> Command {
        let (id, kind, service) = (self.id, self.kind.clone(), self.service.clone());
        Command::perform(async move {
            let result = kind.save(&service, entry).await;
            K::wrap(id, MenuEvent::Saved { action, result })
        })
    }

    fn delete_selected(&mut self) -> Command {
        let Some(entry) = self.list.selected().cloned() else {
            return self.no_selection();
        };

        if let Some(snapshot) = self.kind.delete_snapshot(&entry) {
            if let Err(err) = self.clipboard.write_text(&snapshot) {
                warn!("Could not copy {} before delete: {}", entry.key(), err);
            }
        }

        let (id, kind, service) = (self.id, self.kind.clone(), self.service.clone());
        let label = entry.title().to_string();
        Command::perform(async move {
            let result = kind.delete(&service, entry).await;
            K::wrap(id, MenuEvent::Deleted { label, result })
        })
    }

    fn toggle_selected(&mut self) -> Command {
        let Some(entry) = self.list.selected().cloned() else {
            return self.no_selection();
        };

        // Shown right away; a failed save is reported but not rolled back
        let toggled = self.kind.toggled(&entry);
        self.list.set_selected(toggled.clone());
        self.save(SaveAction::Toggle, toggled)
    }

    fn copy_selected(&mut self) -> Command {
        let Some(entry) = self.list.selected().cloned() else {
            return self.no_selection();
        };

        let (id, kind, service) = (self.id, self.kind.clone(), self.service.clone());
        let clipboard = self.clipboard.clone();
        Command::perform(async move {
            let label = entry.title().to_string();
            let status = match kind.export(&service, entry).await {
                Ok(text) => match clipboard.write_text(&text) {
                    Ok(()) => {
                        StatusMessage::info(format!("copied \"{}\" to system clipboard", label))
                    }
                    Err(err) => StatusMessage::error(err.to_string()),
                },
                Err(err) => StatusMessage::error(err.to_string()),
            };
            K::wrap(id, MenuEvent::Status(status))
        })
    }

    fn paste(&mut self) -> Command {
        let draft = self
            .clipboard
            .read_text()
            .map_err(|err| err.to_string())
            .and_then(|text| {
                serde_json::from_str::<ItemDraft>(&text).map_err(|err| err.to_string())
            });

        match draft {
            Ok(draft) => {
                let (id, kind, service) = (self.id, self.kind.clone(), self.service.clone());
                Command::perform(async move {
                    let result = kind.paste(&service, draft).await;
                    K::wrap(id, MenuEvent::Created(result))
                })
            }
            Err(reason) => {
                self.list
                    .set_status(StatusMessage::error(format!("no items in clipboard: {}", reason)));
                Command::None
            }
        }
    }
}

/// Shift-Tab arrives as BackTab on most terminals and as Tab+Shift on some
pub(crate) fn is_back_tab(key: &KeyEvent) -> bool {
    key.code == KeyCode::BackTab
        || (key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT))
}
