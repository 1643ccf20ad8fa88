// ABOUTME: Integration tests for the SQLite storage gateway
// ABOUTME: Covers CRUD, cascading deletes, tag membership and file-backed databases

use pretty_assertions::assert_eq;
use taskdeck_storage::{SqliteStorage, StorageError, StorageGateway};

/// Helper to create a migrated in-memory database for testing
async fn create_test_storage() -> SqliteStorage {
    let storage = SqliteStorage::in_memory().await.unwrap();
    storage.initialize().await.unwrap();
    storage
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[tokio::test]
async fn test_create_and_list_boards_in_creation_order() {
    let storage = create_test_storage().await;

    let inbox = storage.create_board("Inbox").await.unwrap();
    let work = storage.create_board("Work").await.unwrap();

    assert!(inbox.id.starts_with("board-"));
    assert_ne!(inbox.id, work.id);

    let boards = storage.list_boards().await.unwrap();
    let names: Vec<&str> = boards.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Inbox", "Work"]);
}

#[tokio::test]
async fn test_update_board_renames() {
    let storage = create_test_storage().await;
    let board = storage.create_board("Inbox").await.unwrap();

    let renamed = storage.update_board(&board.id, "Today").await.unwrap();

    assert_eq!(renamed.id, board.id);
    assert_eq!(renamed.name, "Today");
    assert_eq!(renamed.created_at, board.created_at);
}

#[tokio::test]
async fn test_unknown_board_is_not_found() {
    let storage = create_test_storage().await;

    let get = storage.get_board("board-missing").await;
    assert!(matches!(get, Err(StorageError::NotFound { entity: "board", .. })));

    let update = storage.update_board("board-missing", "x").await;
    assert!(matches!(update, Err(StorageError::NotFound { .. })));

    let delete = storage.delete_board("board-missing").await;
    assert!(matches!(delete, Err(StorageError::NotFound { .. })));

    let create_item = storage.create_item("board-missing", "task", "").await;
    assert!(matches!(create_item, Err(StorageError::NotFound { entity: "board", .. })));
}

#[tokio::test]
async fn test_create_item_defaults() {
    let storage = create_test_storage().await;
    let board = storage.create_board("Inbox").await.unwrap();

    let item = storage.create_item(&board.id, "task", "desc").await.unwrap();

    assert!(item.id.starts_with("item-"));
    assert_eq!(item.board_id, board.id);
    assert_eq!(item.title, "task");
    assert_eq!(item.description, "desc");
    assert!(!item.completed);
    assert!(item.tags.is_empty());
}

#[tokio::test]
async fn test_update_item_replaces_all_fields_and_tags() {
    let storage = create_test_storage().await;
    let board = storage.create_board("Inbox").await.unwrap();
    let item = storage.create_item(&board.id, "task", "desc").await.unwrap();

    let updated = storage
        .update_item(&item.id, "renamed", "new desc", true, &tags(&["work", "go"]))
        .await
        .unwrap();

    assert_eq!(updated.title, "renamed");
    assert_eq!(updated.description, "new desc");
    assert!(updated.completed);
    assert_eq!(updated.tags, tags(&["work", "go"]));

    // Full overwrite: the previous tag set is gone
    let updated = storage
        .update_item(&item.id, "renamed", "new desc", false, &tags(&["home"]))
        .await
        .unwrap();
    assert_eq!(updated.tags, tags(&["home"]));
    assert!(!updated.completed);

    let fetched = storage.get_item(&item.id).await.unwrap();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_update_stale_item_is_not_found_and_leaves_tags() {
    let storage = create_test_storage().await;
    let board = storage.create_board("Inbox").await.unwrap();
    let item = storage.create_item(&board.id, "task", "").await.unwrap();
    storage
        .update_item(&item.id, "task", "", false, &tags(&["work"]))
        .await
        .unwrap();

    let result = storage
        .update_item("item-missing", "x", "", false, &tags(&["other"]))
        .await;

    assert!(matches!(result, Err(StorageError::NotFound { entity: "item", .. })));
    assert_eq!(storage.list_distinct_tags().await.unwrap(), tags(&["work"]));
}

#[tokio::test]
async fn test_tag_queries_track_memberships() {
    let storage = create_test_storage().await;
    let board = storage.create_board("Inbox").await.unwrap();
    let first = storage.create_item(&board.id, "first", "").await.unwrap();
    let second = storage.create_item(&board.id, "second", "").await.unwrap();

    storage
        .update_item(&first.id, "first", "", false, &tags(&["work", "urgent"]))
        .await
        .unwrap();
    storage
        .update_item(&second.id, "second", "", false, &tags(&["work"]))
        .await
        .unwrap();

    assert_eq!(
        storage.list_distinct_tags().await.unwrap(),
        tags(&["urgent", "work"])
    );
    assert_eq!(storage.count_items_by_tag("work").await.unwrap(), 2);
    assert_eq!(storage.count_items_by_tag("urgent").await.unwrap(), 1);
    assert_eq!(storage.count_items_by_tag("Work").await.unwrap(), 0);

    let work_items = storage.list_items_by_tag("work").await.unwrap();
    let titles: Vec<&str> = work_items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["first", "second"]);
    // Items come back with their complete tag set
    assert_eq!(work_items[0].tags, tags(&["work", "urgent"]));

    storage.delete_tag_association("work").await.unwrap();

    assert_eq!(storage.count_items_by_tag("work").await.unwrap(), 0);
    assert_eq!(storage.list_distinct_tags().await.unwrap(), tags(&["urgent"]));
    assert_eq!(storage.list_items_by_board(&board.id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_delete_board_cascades_to_items_and_tags() {
    let storage = create_test_storage().await;
    let doomed = storage.create_board("Doomed").await.unwrap();
    let kept = storage.create_board("Kept").await.unwrap();

    let gone = storage.create_item(&doomed.id, "gone", "").await.unwrap();
    let stays = storage.create_item(&kept.id, "stays", "").await.unwrap();
    storage
        .update_item(&gone.id, "gone", "", false, &tags(&["shared", "only-doomed"]))
        .await
        .unwrap();
    storage
        .update_item(&stays.id, "stays", "", false, &tags(&["shared"]))
        .await
        .unwrap();

    storage.delete_board(&doomed.id).await.unwrap();

    assert!(matches!(
        storage.get_item(&gone.id).await,
        Err(StorageError::NotFound { .. })
    ));
    assert_eq!(storage.list_distinct_tags().await.unwrap(), tags(&["shared"]));
    let shared = storage.list_items_by_tag("shared").await.unwrap();
    assert_eq!(shared.len(), 1);
    assert_eq!(shared[0].id, stays.id);
}

#[tokio::test]
async fn test_delete_item_removes_memberships() {
    let storage = create_test_storage().await;
    let board = storage.create_board("Inbox").await.unwrap();
    let item = storage.create_item(&board.id, "task", "").await.unwrap();
    storage
        .update_item(&item.id, "task", "", false, &tags(&["work"]))
        .await
        .unwrap();

    storage.delete_item(&item.id).await.unwrap();

    assert!(storage.list_items_by_board(&board.id).await.unwrap().is_empty());
    assert!(storage.list_distinct_tags().await.unwrap().is_empty());
    assert!(matches!(
        storage.delete_item(&item.id).await,
        Err(StorageError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_file_database_persists_across_connections() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("taskdeck.db");

    {
        let storage = SqliteStorage::connect(&path).await.unwrap();
        storage.initialize().await.unwrap();
        storage.create_board("Persisted").await.unwrap();
        storage.pool().close().await;
    }

    let reopened = SqliteStorage::connect(&path).await.unwrap();
    reopened.initialize().await.unwrap();
    let boards = reopened.list_boards().await.unwrap();
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0].name, "Persisted");
}
