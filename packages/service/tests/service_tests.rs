// ABOUTME: Integration tests for the board service over SQLite
// ABOUTME: Covers validation, tag bookkeeping, cascades and the paste import flow

use pretty_assertions::assert_eq;
use std::sync::Arc;
use taskdeck_core::ItemDraft;
use taskdeck_service::{BoardService, ServiceError};
use taskdeck_storage::SqliteStorage;

async fn create_test_service() -> BoardService {
    let storage = SqliteStorage::in_memory().await.unwrap();
    storage.initialize().await.unwrap();
    BoardService::new(Arc::new(storage))
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[tokio::test]
async fn test_board_lifecycle() {
    let service = create_test_service().await;

    let mut board = service.create_board("  Inbox ").await.unwrap();
    assert_eq!(board.name, "Inbox");

    board.name = "Today".to_string();
    let renamed = service.update_board(&board).await.unwrap();
    assert_eq!(renamed.name, "Today");

    let boards = service.list_boards().await.unwrap();
    assert_eq!(boards, vec![renamed.clone()]);

    service.delete_board(&renamed).await.unwrap();
    assert!(service.list_boards().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_blank_names_are_rejected() {
    let service = create_test_service().await;

    assert!(matches!(
        service.create_board("   ").await,
        Err(ServiceError::Validation(_))
    ));

    let mut board = service.create_board("Inbox").await.unwrap();
    assert!(matches!(
        service.create_item(&board, "", "desc").await,
        Err(ServiceError::Validation(_))
    ));

    board.name = String::new();
    assert!(matches!(
        service.update_board(&board).await,
        Err(ServiceError::Validation(_))
    ));
}

#[tokio::test]
async fn test_update_item_rejects_empty_tags() {
    let service = create_test_service().await;
    let board = service.create_board("Inbox").await.unwrap();
    let mut item = service.create_item(&board, "task", "").await.unwrap();

    item.tags = tags(&["work", " "]);
    let result = service.update_item(&item).await;

    assert!(matches!(result, Err(ServiceError::Validation(_))));
    assert!(service.list_tags().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_item_normalizes_tags() {
    let service = create_test_service().await;
    let board = service.create_board("Inbox").await.unwrap();
    let mut item = service.create_item(&board, "task", "").await.unwrap();

    item.tags = tags(&[" work", "work ", "go"]);
    let saved = service.update_item(&item).await.unwrap();

    assert_eq!(saved.tags, tags(&["work", "go"]));
}

#[tokio::test]
async fn test_stale_item_update_is_not_found() {
    let service = create_test_service().await;
    let board = service.create_board("Inbox").await.unwrap();
    let item = service.create_item(&board, "task", "").await.unwrap();
    service.delete_item(&item).await.unwrap();

    let err = service.update_item(&item).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_tag_counts_follow_updates() {
    let service = create_test_service().await;
    let board = service.create_board("Inbox").await.unwrap();
    let mut first = service.create_item(&board, "first", "").await.unwrap();
    let mut second = service.create_item(&board, "second", "").await.unwrap();

    first.tags = tags(&["work", "home"]);
    first = service.update_item(&first).await.unwrap();
    second.tags = tags(&["work"]);
    service.update_item(&second).await.unwrap();

    assert_eq!(service.count_items_by_tag("work").await.unwrap(), 2);
    assert_eq!(service.count_items_by_tag("home").await.unwrap(), 1);

    first.tags = tags(&["home"]);
    service.update_item(&first).await.unwrap();

    assert_eq!(service.count_items_by_tag("work").await.unwrap(), 1);
    assert_eq!(service.count_items_by_tag("home").await.unwrap(), 1);
    assert_eq!(
        service.list_items_by_tag("work").await.unwrap().len(),
        service.count_items_by_tag("work").await.unwrap()
    );

    assert_eq!(
        service.tag_summaries().await.unwrap(),
        vec![("home".to_string(), 1), ("work".to_string(), 1)]
    );
}

#[tokio::test]
async fn test_delete_board_hides_items_everywhere() {
    let service = create_test_service().await;
    let board = service.create_board("Doomed").await.unwrap();
    let mut item = service.create_item(&board, "task", "").await.unwrap();
    item.tags = tags(&["work"]);
    service.update_item(&item).await.unwrap();

    service.delete_board(&board).await.unwrap();

    let err = service.list_items_by_board(&board).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(service.list_items_by_tag("work").await.unwrap().is_empty());
    assert!(service.list_tags().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_tag_keeps_items() {
    let service = create_test_service().await;
    let board = service.create_board("Inbox").await.unwrap();
    let mut item = service.create_item(&board, "task", "").await.unwrap();
    item.tags = tags(&["work", "go"]);
    service.update_item(&item).await.unwrap();

    service.delete_tag("work").await.unwrap();

    let items = service.list_items_by_board(&board).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].tags, tags(&["go"]));
    assert_eq!(service.count_items_by_tag("work").await.unwrap(), 0);
}

#[tokio::test]
async fn test_import_item_recreates_draft() {
    let service = create_test_service().await;
    let board = service.create_board("Inbox").await.unwrap();
    let draft = ItemDraft {
        title: "pasted".to_string(),
        description: "from clipboard".to_string(),
        completed: true,
        tags: tags(&["work", "go"]),
    };

    let item = service.import_item(&board, &draft).await.unwrap();

    assert_eq!(ItemDraft::from(&item), draft);
    assert_eq!(item.board_id, board.id);
    assert_eq!(service.list_items_by_board(&board).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_copied_item_keeps_description_whitespace() {
    let service = create_test_service().await;
    let board = service.create_board("Inbox").await.unwrap();
    let mut item = service.create_item(&board, "notes", "").await.unwrap();
    item.description = "  indented notes\n".to_string();
    item.tags = tags(&["work"]);
    let source = service.update_item(&item).await.unwrap();

    let pasted = service
        .import_item(&board, &ItemDraft::from(&source))
        .await
        .unwrap();

    assert_eq!(pasted.description, "  indented notes\n");
    assert_eq!(ItemDraft::from(&pasted), ItemDraft::from(&source));
}

#[tokio::test]
async fn test_end_to_end_inbox_scenario() {
    let service = create_test_service().await;

    let inbox = service.create_board("Inbox").await.unwrap();
    let mut item = service.create_item(&inbox, "task", "desc").await.unwrap();

    item.tags = tags(&["work", "go"]);
    item = service.update_item(&item).await.unwrap();
    assert_eq!(service.count_items_by_tag("work").await.unwrap(), 1);

    item.tags = tags(&["go"]);
    item = service.update_item(&item).await.unwrap();
    assert_eq!(service.count_items_by_tag("work").await.unwrap(), 0);
    assert_eq!(service.count_items_by_tag("go").await.unwrap(), 1);

    service.delete_item(&item).await.unwrap();
    assert!(service.list_items_by_board(&inbox).await.unwrap().is_empty());
}
