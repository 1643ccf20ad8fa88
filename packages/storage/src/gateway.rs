use async_trait::async_trait;
use taskdeck_core::{Board, Item};

use crate::StorageResult;

/// Durable CRUD for boards, items and tag membership.
///
/// Implementations own id and timestamp assignment. Deleting a board must
/// remove its items and their tag memberships in the same operation.
#[async_trait]
pub trait StorageGateway: Send + Sync {
    // Boards
    async fn create_board(&self, name: &str) -> StorageResult<Board>;
    async fn get_board(&self, id: &str) -> StorageResult<Board>;
    async fn list_boards(&self) -> StorageResult<Vec<Board>>;
    async fn update_board(&self, id: &str, name: &str) -> StorageResult<Board>;
    async fn delete_board(&self, id: &str) -> StorageResult<()>;

    // Items
    async fn create_item(&self, board_id: &str, title: &str, description: &str)
        -> StorageResult<Item>;
    async fn get_item(&self, id: &str) -> StorageResult<Item>;
    async fn list_items_by_board(&self, board_id: &str) -> StorageResult<Vec<Item>>;
    /// Replaces every mutable field, including the whole tag set
    async fn update_item(
        &self,
        id: &str,
        title: &str,
        description: &str,
        completed: bool,
        tags: &[String],
    ) -> StorageResult<Item>;
    async fn delete_item(&self, id: &str) -> StorageResult<()>;

    // Tags
    async fn list_distinct_tags(&self) -> StorageResult<Vec<String>>;
    async fn list_items_by_tag(&self, tag: &str) -> StorageResult<Vec<Item>>;
    async fn count_items_by_tag(&self, tag: &str) -> StorageResult<usize>;
    async fn delete_tag_association(&self, tag: &str) -> StorageResult<()>;
}
