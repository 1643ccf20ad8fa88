// ABOUTME: Tests for the binary's database and reporting helpers
// ABOUTME: Uses a real SQLite file in a temp directory

use pretty_assertions::assert_eq;
use std::path::Path;
use std::time::Duration;
use taskdeck_cli::{board_summaries, boards_table, export_board, open_service};
use taskdeck_core::Config;

fn config_in(dir: &Path) -> Config {
    Config {
        data_dir: dir.to_path_buf(),
        database_path: dir.join("nested").join("taskdeck.db"),
        log_path: dir.join("taskdeck.log"),
        log_level: "info".to_string(),
        tick_rate: Duration::from_millis(250),
        status_timeout: Duration::from_secs(3),
    }
}

#[tokio::test]
async fn test_open_service_creates_database() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let service = open_service(&config).await.unwrap();
    service.create_board("Inbox").await.unwrap();

    assert!(config.database_path.exists());

    // Reopening sees the same data and re-running migrations is harmless
    let reopened = open_service(&config).await.unwrap();
    assert_eq!(reopened.list_boards().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_board_summaries_count_items() {
    let dir = tempfile::tempdir().unwrap();
    let service = open_service(&config_in(dir.path())).await.unwrap();
    let board = service.create_board("Inbox").await.unwrap();
    let mut item = service.create_item(&board, "done", "").await.unwrap();
    item.completed = true;
    service.update_item(&item).await.unwrap();
    service.create_item(&board, "open", "").await.unwrap();

    let summaries = board_summaries(&service).await.unwrap();

    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].items, 2);
    assert_eq!(summaries[0].completed, 1);

    let table = boards_table(&summaries).to_string();
    assert!(table.contains("Inbox"));
}

#[tokio::test]
async fn test_export_by_name_or_id() {
    let dir = tempfile::tempdir().unwrap();
    let service = open_service(&config_in(dir.path())).await.unwrap();
    let board = service.create_board("Inbox").await.unwrap();
    service.create_item(&board, "task", "").await.unwrap();

    let by_name = export_board(&service, "Inbox").await.unwrap();
    let by_id = export_board(&service, &board.id).await.unwrap();

    assert_eq!(by_name, "# Inbox\n\n- [ ] task\n  No tags\n");
    assert_eq!(by_name, by_id);
    assert!(export_board(&service, "missing").await.is_err());
}
