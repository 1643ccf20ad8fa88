// ABOUTME: Board service enforcing domain rules over the storage gateway
// ABOUTME: Validates names and titles, normalizes tags, maps storage errors

use std::sync::Arc;
use taskdeck_core::{Board, Item, ItemDraft};
use taskdeck_storage::StorageGateway;
use tracing::{debug, info};

use crate::error::{ServiceError, ServiceResult};
use crate::tags::normalize_tags;

#[derive(Clone)]
pub struct BoardService {
    storage: Arc<dyn StorageGateway>,
}

impl BoardService {
    pub fn new(storage: Arc<dyn StorageGateway>) -> Self {
        Self { storage }
    }

    pub async fn create_board(&self, name: &str) -> ServiceResult<Board> {
        let name = required("board name", name)?;
        let board = self.storage.create_board(name).await?;
        info!("Created board {} ({})", board.name, board.id);
        Ok(board)
    }

    pub async fn list_boards(&self) -> ServiceResult<Vec<Board>> {
        Ok(self.storage.list_boards().await?)
    }

    pub async fn update_board(&self, board: &Board) -> ServiceResult<Board> {
        let name = required("board name", &board.name)?;
        Ok(self.storage.update_board(&board.id, name).await?)
    }

    /// Deletes the board together with its items and their tags
    pub async fn delete_board(&self, board: &Board) -> ServiceResult<()> {
        self.storage.delete_board(&board.id).await?;
        info!("Deleted board {} ({})", board.name, board.id);
        Ok(())
    }

    pub async fn create_item(
        &self,
        board: &Board,
        title: &str,
        description: &str,
    ) -> ServiceResult<Item> {
        let title = required("item title", title)?;
        Ok(self
            .storage
            .create_item(&board.id, title, description)
            .await?)
    }

    /// Fails with NotFound once the board is gone
    pub async fn list_items_by_board(&self, board: &Board) -> ServiceResult<Vec<Item>> {
        self.storage.get_board(&board.id).await?;
        Ok(self.storage.list_items_by_board(&board.id).await?)
    }

    /// Full overwrite of title, description, completion and tags
    pub async fn update_item(&self, item: &Item) -> ServiceResult<Item> {
        let title = required("item title", &item.title)?;
        let tags = normalize_tags(&item.tags)?;
        debug!("Saving item {} with tags {:?}", item.id, tags);

        Ok(self
            .storage
            .update_item(&item.id, title, &item.description, item.completed, &tags)
            .await?)
    }

    pub async fn delete_item(&self, item: &Item) -> ServiceResult<()> {
        Ok(self.storage.delete_item(&item.id).await?)
    }

    pub async fn list_tags(&self) -> ServiceResult<Vec<String>> {
        Ok(self.storage.list_distinct_tags().await?)
    }

    pub async fn list_items_by_tag(&self, tag: &str) -> ServiceResult<Vec<Item>> {
        Ok(self.storage.list_items_by_tag(tag).await?)
    }

    pub async fn count_items_by_tag(&self, tag: &str) -> ServiceResult<usize> {
        Ok(self.storage.count_items_by_tag(tag).await?)
    }

    /// Every known tag with the number of items carrying it
    pub async fn tag_summaries(&self) -> ServiceResult<Vec<(String, usize)>> {
        let tags = self.list_tags().await?;
        let mut summaries = Vec::with_capacity(tags.len());
        for tag in tags {
            let count = self.count_items_by_tag(&tag).await?;
            summaries.push((tag, count));
        }
        Ok(summaries)
    }

    /// Strips the tag from every item; the items themselves stay
    pub async fn delete_tag(&self, tag: &str) -> ServiceResult<()> {
        self.storage.delete_tag_association(tag).await?;
        info!("Deleted tag {}", tag);
        Ok(())
    }

    /// Create a new item on `board` from a pasted draft.
    ///
    /// Creation and the follow-up update are separate storage calls, so a
    /// failed update leaves the freshly created item in place.
    pub async fn import_item(&self, board: &Board, draft: &ItemDraft) -> ServiceResult<Item> {
        let mut item = self
            .create_item(board, &draft.title, &draft.description)
            .await?;
        item.completed = draft.completed;
        item.tags = draft.tags.clone();
        self.update_item(&item).await
    }
}

fn required<'a>(field: &str, value: &'a str) -> ServiceResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::validation(format!("{} must not be empty", field)));
    }
    Ok(trimmed)
}
