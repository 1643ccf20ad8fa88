// ABOUTME: Root controller routing keys, navigation and async results between views
// ABOUTME: Also hosts the runtime loop that spawns commands and redraws the terminal

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::Backend, Terminal};
use std::sync::Arc;
use std::time::{Duration, Instant};
use taskdeck_core::Config;
use taskdeck_service::BoardService;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::clipboard::Clipboard;
use crate::command::Command;
use crate::events::{AppEvent, EventHandler};
use crate::menu::{BoardsKind, ItemsKind, Menu, TagsKind};
use crate::message::{Message, Navigation, View, ViewId};
use crate::ui;

const DEFAULT_TICK_RATE: Duration = Duration::from_millis(250);
const DEFAULT_STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// Main TUI application struct
pub struct App {
    service: Arc<BoardService>,
    clipboard: Arc<dyn Clipboard>,
    boards: Menu<BoardsKind>,
    tags: Menu<TagsKind>,
    items_by_board: Option<Menu<ItemsKind>>,
    items_by_tag: Option<Menu<ItemsKind>>,
    active: View,
    last_size: Option<(u16, u16)>,
    next_view_id: u64,
    tick_rate: Duration,
    status_timeout: Duration,
    should_quit: bool,
}

impl App {
    pub fn new(service: Arc<BoardService>, clipboard: Arc<dyn Clipboard>) -> Self {
        let boards = Menu::new(ViewId(1), BoardsKind, service.clone(), clipboard.clone());
        let tags = Menu::new(ViewId(2), TagsKind, service.clone(), clipboard.clone());
        Self {
            service,
            clipboard,
            boards,
            tags,
            items_by_board: None,
            items_by_tag: None,
            active: View::Boards,
            last_size: None,
            next_view_id: 3,
            tick_rate: DEFAULT_TICK_RATE,
            status_timeout: DEFAULT_STATUS_TIMEOUT,
            should_quit: false,
        }
    }

    pub fn with_config(mut self, config: &Config) -> Self {
        self.tick_rate = config.tick_rate;
        self.status_timeout = config.status_timeout;
        self
    }

    pub fn active_view(&self) -> View {
        self.active
    }

    pub fn boards(&self) -> &Menu<BoardsKind> {
        &self.boards
    }

    pub fn tags(&self) -> &Menu<TagsKind> {
        &self.tags
    }

    pub fn items_by_board(&self) -> Option<&Menu<ItemsKind>> {
        self.items_by_board.as_ref()
    }

    pub fn items_by_tag(&self) -> Option<&Menu<ItemsKind>> {
        self.items_by_tag.as_ref()
    }

    pub fn last_size(&self) -> Option<(u16, u16)> {
        self.last_size
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn init(&self) -> Command {
        self.boards.init()
    }

    pub fn update(&mut self, message: Message) -> Command {
        match message {
            Message::Key(key) => self.handle_key(key),
            Message::Resize { width, height } => {
                self.last_size = Some((width, height));
                self.resize_active(width, height);
                Command::None
            }
            Message::Tick => {
                self.expire_statuses(Instant::now());
                Command::None
            }
            Message::Navigate(navigation) => self.navigate(navigation),
            Message::Quit => {
                self.quit();
                Command::None
            }
            Message::Boards(id, event) => {
                if id == self.boards.id() {
                    return self.boards.apply(event);
                }
                self.drop_stale(id)
            }
            Message::Tags(id, event) => {
                if id == self.tags.id() {
                    return self.tags.apply(event);
                }
                self.drop_stale(id)
            }
            Message::Items(id, event) => {
                if let Some(menu) = self.items_by_board.as_mut() {
                    if menu.id() == id {
                        return menu.apply(event);
                    }
                }
                if let Some(menu) = self.items_by_tag.as_mut() {
                    if menu.id() == id {
                        return menu.apply(event);
                    }
                }
                self.drop_stale(id)
            }
        }
    }

    fn drop_stale(&self, id: ViewId) -> Command {
        debug!("Dropping result for replaced view {}", id);
        Command::None
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return Command::None;
        }

        match self.active {
            View::Boards => self.boards.handle_key(key),
            View::Tags => self.tags.handle_key(key),
            View::ItemsByBoard => self
                .items_by_board
                .as_mut()
                .map_or(Command::None, |menu| menu.handle_key(key)),
            View::ItemsByTag => self
                .items_by_tag
                .as_mut()
                .map_or(Command::None, |menu| menu.handle_key(key)),
        }
    }

    fn resize_active(&mut self, width: u16, height: u16) {
        match self.active {
            View::Boards => self.boards.resize(width, height),
            View::Tags => self.tags.resize(width, height),
            View::ItemsByBoard => {
                if let Some(menu) = self.items_by_board.as_mut() {
                    menu.resize(width, height);
                }
            }
            View::ItemsByTag => {
                if let Some(menu) = self.items_by_tag.as_mut() {
                    menu.resize(width, height);
                }
            }
        }
    }

    fn expire_statuses(&mut self, now: Instant) {
        let timeout = self.status_timeout;
        self.boards.tick(now, timeout);
        self.tags.tick(now, timeout);
        for menu in [self.items_by_board.as_mut(), self.items_by_tag.as_mut()]
            .into_iter()
            .flatten()
        {
            menu.tick(now, timeout);
        }
    }

    fn navigate(&mut self, navigation: Navigation) -> Command {
        match navigation {
            Navigation::SwitchRoot(target) => self.switch_root(target),
            Navigation::OpenBoardItems => self.open_board_items(),
            Navigation::OpenTagItems => self.open_tag_items(),
            Navigation::Back => self.back(),
            Navigation::BoardDelta(delta) => self.board_delta(delta),
            Navigation::TagDelta(delta) => self.tag_delta(delta),
        }
    }

    fn replay_size(&self) -> Command {
        match self.last_size {
            Some((width, height)) => Command::message(Message::Resize { width, height }),
            None => Command::None,
        }
    }

    fn allocate_view_id(&mut self) -> ViewId {
        let id = ViewId(self.next_view_id);
        self.next_view_id += 1;
        id
    }

    fn switch_root(&mut self, target: View) -> Command {
        let source_idle = match self.active {
            View::Boards => self.boards.is_idle(),
            View::Tags => self.tags.is_idle(),
            _ => false,
        };
        if !source_idle || !target.is_root() || target == self.active {
            return Command::None;
        }

        info!("Switching to {} view", target);
        self.active = target;
        let load = match target {
            View::Tags => self.tags.init(),
            _ => self.boards.init(),
        };
        Command::batch([load, self.replay_size()])
    }

    fn open_board_items(&mut self) -> Command {
        if !self.boards.is_idle() {
            return Command::None;
        }
        let Some(board) = self.boards.selected().map(|entry| entry.board.clone()) else {
            return Command::None;
        };

        info!("Opening board {} ({})", board.name, board.id);
        let id = self.allocate_view_id();
        let menu = Menu::new(
            id,
            ItemsKind::for_board(board),
            self.service.clone(),
            self.clipboard.clone(),
        );
        let load = menu.init();
        self.items_by_board = Some(menu);
        self.active = View::ItemsByBoard;
        Command::batch([load, self.replay_size()])
    }

    fn open_tag_items(&mut self) -> Command {
        if !self.tags.is_idle() {
            return Command::None;
        }
        let Some(tag) = self.tags.selected().map(|entry| entry.tag.clone()) else {
            return Command::None;
        };

        info!("Opening tag {}", tag);
        let id = self.allocate_view_id();
        let menu = Menu::new(
            id,
            ItemsKind::for_tag(tag),
            self.service.clone(),
            self.clipboard.clone(),
        );
        let load = menu.init();
        self.items_by_tag = Some(menu);
        self.active = View::ItemsByTag;
        Command::batch([load, self.replay_size()])
    }

    fn back(&mut self) -> Command {
        self.active = match self.active {
            View::ItemsByBoard => View::Boards,
            View::ItemsByTag => View::Tags,
            _ => return Command::None,
        };
        self.replay_size()
    }

    fn board_delta(&mut self, delta: isize) -> Command {
        let count = self.boards.list().visible_len();
        if count == 0 || !self.boards.is_idle() {
            return Command::None;
        }

        let current = self.boards.list().index().unwrap_or(0) as isize;
        self.boards.select(wrap_index(current, delta, count));

        if self.active == View::ItemsByBoard {
            self.open_board_items()
        } else {
            Command::None
        }
    }

    fn tag_delta(&mut self, delta: isize) -> Command {
        let count = self.tags.list().visible_len();
        if count == 0 || !self.tags.is_idle() {
            return Command::None;
        }

        let current = self.tags.list().index().unwrap_or(0) as isize;
        self.tags.select(wrap_index(current, delta, count));

        if self.active == View::ItemsByTag {
            self.open_tag_items()
        } else {
            Command::None
        }
    }

    /// Drive the UI until quit. Commands run on the tokio runtime and report
    /// back through the event channel; the loop itself never awaits them.
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let mut events = EventHandler::new(self.tick_rate);
        let sender = events.sender();

        let size = terminal.size().context("Failed to read terminal size")?;
        self.update(Message::Resize {
            width: size.width,
            height: size.height,
        });
        spawn_command(self.init(), &sender);
        info!("Started taskdeck UI");

        while !self.should_quit {
            let app: &App = self;
            terminal
                .draw(|frame| ui::render(frame, app))
                .context("Failed to draw frame")?;

            let Some(event) = events.next().await else {
                break;
            };
            let message = match event {
                AppEvent::Key(key) => Message::Key(key),
                AppEvent::Resize(width, height) => Message::Resize { width, height },
                AppEvent::Tick => Message::Tick,
                AppEvent::Message(message) => message,
            };
            let command = self.update(message);
            spawn_command(command, &sender);
        }

        Ok(())
    }
}

fn wrap_index(current: isize, delta: isize, count: usize) -> usize {
    (current + delta).rem_euclid(count as isize) as usize
}

fn spawn_command(command: Command, sender: &mpsc::UnboundedSender<AppEvent>) {
    for future in command.into_futures() {
        let sender = sender.clone();
        tokio::spawn(async move {
            let message = future.await;
            // The receiver is gone once the loop has exited
            let _ = sender.send(AppEvent::Message(message));
        });
    }
}
