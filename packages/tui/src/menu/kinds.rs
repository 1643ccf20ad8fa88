use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent};
use taskdeck_core::{Board, ItemDraft};
use taskdeck_service::{items_to_markdown, BoardService, ServiceError, ServiceResult};

use super::{is_back_tab, Capabilities, MenuKind};
use crate::entries::{BoardEntry, ItemEntry, TagEntry};
use crate::list::FilterState;
use crate::message::{MenuEvent, Message, Navigation, View, ViewId};

pub const APP_TITLE: &str = "taskdeck";

#[derive(Debug, Clone, Copy, Default)]
pub struct BoardsKind;

#[async_trait]
impl MenuKind for BoardsKind {
    type Entry = BoardEntry;

    fn view(&self) -> View {
        View::Boards
    }

    fn title(&self) -> String {
        APP_TITLE.to_string()
    }

    fn noun(&self) -> &'static str {
        "board"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities {
            create: true,
            rename: true,
            ..Capabilities::default()
        }
    }

    fn wrap(id: ViewId, event: MenuEvent<BoardEntry>) -> Message {
        Message::Boards(id, event)
    }

    fn navigation(&self, key: &KeyEvent, _filter: FilterState) -> Option<Navigation> {
        match key.code {
            KeyCode::Enter => Some(Navigation::OpenBoardItems),
            KeyCode::Tab => Some(Navigation::SwitchRoot(View::Tags)),
            _ => None,
        }
    }

    async fn load(&self, service: &BoardService) -> ServiceResult<Vec<BoardEntry>> {
        let boards = service.list_boards().await?;
        Ok(boards.into_iter().map(BoardEntry::new).collect())
    }

    async fn delete(&self, service: &BoardService, entry: BoardEntry) -> ServiceResult<()> {
        service.delete_board(&entry.board).await
    }

    async fn export(&self, service: &BoardService, entry: BoardEntry) -> ServiceResult<String> {
        let items = service.list_items_by_board(&entry.board).await?;
        Ok(items_to_markdown(&entry.board.name, &items))
    }

    async fn create(
        &self,
        service: &BoardService,
        name: String,
        _description: String,
    ) -> ServiceResult<BoardEntry> {
        service.create_board(&name).await.map(BoardEntry::new)
    }

    async fn save(&self, service: &BoardService, entry: BoardEntry) -> ServiceResult<BoardEntry> {
        service.update_board(&entry.board).await.map(BoardEntry::new)
    }

    fn renamed(&self, entry: &BoardEntry, name: String, _description: String) -> BoardEntry {
        let mut board = entry.board.clone();
        board.name = name;
        BoardEntry::new(board)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TagsKind;

#[async_trait]
impl MenuKind for TagsKind {
    type Entry = TagEntry;

    fn view(&self) -> View {
        View::Tags
    }

    fn title(&self) -> String {
        format!("{} | Tags", APP_TITLE)
    }

    fn noun(&self) -> &'static str {
        "tag"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::default()
    }

    fn wrap(id: ViewId, event: MenuEvent<TagEntry>) -> Message {
        Message::Tags(id, event)
    }

    fn navigation(&self, key: &KeyEvent, _filter: FilterState) -> Option<Navigation> {
        match key.code {
            KeyCode::Enter => Some(Navigation::OpenTagItems),
            KeyCode::Tab => Some(Navigation::SwitchRoot(View::Boards)),
            _ => None,
        }
    }

    async fn load(&self, service: &BoardService) -> ServiceResult<Vec<TagEntry>> {
        let summaries = service.tag_summaries().await?;
        Ok(summaries
            .into_iter()
            .map(|(tag, count)| TagEntry::new(tag, count))
            .collect())
    }

    async fn delete(&self, service: &BoardService, entry: TagEntry) -> ServiceResult<()> {
        service.delete_tag(&entry.tag).await
    }

    async fn export(&self, service: &BoardService, entry: TagEntry) -> ServiceResult<String> {
        let items = service.list_items_by_tag(&entry.tag).await?;
        Ok(items_to_markdown(&entry.tag, &items))
    }
}

/// Where an item view gets its items from
#[derive(Debug, Clone, PartialEq)]
pub enum ItemsScope {
    Board(Board),
    Tag(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ItemsKind {
    scope: ItemsScope,
}

impl ItemsKind {
    pub fn for_board(board: Board) -> Self {
        Self {
            scope: ItemsScope::Board(board),
        }
    }

    pub fn for_tag(tag: impl Into<String>) -> Self {
        Self {
            scope: ItemsScope::Tag(tag.into()),
        }
    }

    pub fn scope(&self) -> &ItemsScope {
        &self.scope
    }

    fn board(&self) -> ServiceResult<&Board> {
        match &self.scope {
            ItemsScope::Board(board) => Ok(board),
            ItemsScope::Tag(tag) => Err(ServiceError::validation(format!(
                "items cannot be added to tag \"{}\"",
                tag
            ))),
        }
    }
}

#[async_trait]
impl MenuKind for ItemsKind {
    type Entry = ItemEntry;

    fn view(&self) -> View {
        match self.scope {
            ItemsScope::Board(_) => View::ItemsByBoard,
            ItemsScope::Tag(_) => View::ItemsByTag,
        }
    }

    fn title(&self) -> String {
        match &self.scope {
            ItemsScope::Board(board) => board.name.clone(),
            ItemsScope::Tag(tag) => tag.clone(),
        }
    }

    fn noun(&self) -> &'static str {
        "item"
    }

    fn capabilities(&self) -> Capabilities {
        let by_board = matches!(self.scope, ItemsScope::Board(_));
        Capabilities {
            create: by_board,
            rename: true,
            describe: true,
            update_tags: true,
            toggle_complete: true,
            paste: by_board,
        }
    }

    fn wrap(id: ViewId, event: MenuEvent<ItemEntry>) -> Message {
        Message::Items(id, event)
    }

    fn navigation(&self, key: &KeyEvent, filter: FilterState) -> Option<Navigation> {
        let delta = |d: isize| match self.scope {
            ItemsScope::Board(_) => Navigation::BoardDelta(d),
            ItemsScope::Tag(_) => Navigation::TagDelta(d),
        };

        if is_back_tab(key) {
            return Some(delta(-1));
        }
        match key.code {
            KeyCode::Tab => Some(delta(1)),
            KeyCode::Backspace => Some(Navigation::Back),
            // Esc clears an applied filter before it leaves the view
            KeyCode::Esc if filter == FilterState::Unfiltered => Some(Navigation::Back),
            _ => None,
        }
    }

    async fn load(&self, service: &BoardService) -> ServiceResult<Vec<ItemEntry>> {
        let items = match &self.scope {
            ItemsScope::Board(board) => service.list_items_by_board(board).await?,
            ItemsScope::Tag(tag) => service.list_items_by_tag(tag).await?,
        };
        Ok(items.into_iter().map(ItemEntry::new).collect())
    }

    async fn delete(&self, service: &BoardService, entry: ItemEntry) -> ServiceResult<()> {
        service.delete_item(&entry.item).await
    }

    async fn export(&self, _service: &BoardService, entry: ItemEntry) -> ServiceResult<String> {
        serde_json::to_string(&ItemDraft::from(&entry.item))
            .map_err(|err| ServiceError::validation(format!("cannot encode item: {}", err)))
    }

    async fn create(
        &self,
        service: &BoardService,
        name: String,
        description: String,
    ) -> ServiceResult<ItemEntry> {
        let board = self.board()?;
        service
            .create_item(board, &name, &description)
            .await
            .map(ItemEntry::new)
    }

    async fn save(&self, service: &BoardService, entry: ItemEntry) -> ServiceResult<ItemEntry> {
        service.update_item(&entry.item).await.map(ItemEntry::new)
    }

    async fn paste(&self, service: &BoardService, draft: ItemDraft) -> ServiceResult<ItemEntry> {
        let board = self.board()?;
        service.import_item(board, &draft).await.map(ItemEntry::new)
    }

    fn renamed(&self, entry: &ItemEntry, name: String, description: String) -> ItemEntry {
        let mut item = entry.item.clone();
        item.title = name;
        item.description = description;
        ItemEntry::new(item)
    }

    fn tags(&self, entry: &ItemEntry) -> Vec<String> {
        entry.item.tags.clone()
    }

    fn with_tags(&self, entry: &ItemEntry, tags: Vec<String>) -> ItemEntry {
        let mut item = entry.item.clone();
        item.tags = tags;
        ItemEntry::new(item)
    }

    fn toggled(&self, entry: &ItemEntry) -> ItemEntry {
        let mut item = entry.item.clone();
        item.completed = !item.completed;
        ItemEntry::new(item)
    }

    fn delete_snapshot(&self, entry: &ItemEntry) -> Option<String> {
        serde_json::to_string(&ItemDraft::from(&entry.item)).ok()
    }
}
