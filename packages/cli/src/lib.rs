// ABOUTME: Shared plumbing for the taskdeck binary
// ABOUTME: Opens the database, summarizes boards and renders exports

pub mod logging;
pub mod terminal;

use anyhow::{anyhow, Context, Result};
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use std::sync::Arc;
use taskdeck_core::{Board, Config};
use taskdeck_service::{items_to_markdown, BoardService};
use taskdeck_storage::SqliteStorage;
use tracing::info;

/// Open the configured database, apply migrations and wrap it in a service
pub async fn open_service(config: &Config) -> Result<BoardService> {
    let storage = SqliteStorage::connect(&config.database_path)
        .await
        .with_context(|| format!("Failed to open database {}", config.database_path.display()))?;
    storage
        .initialize()
        .await
        .context("Failed to run database migrations")?;

    info!("Using database {}", config.database_path.display());
    Ok(BoardService::new(Arc::new(storage)))
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardSummary {
    pub board: Board,
    pub items: usize,
    pub completed: usize,
}

pub async fn board_summaries(service: &BoardService) -> Result<Vec<BoardSummary>> {
    let mut summaries = Vec::new();
    for board in service.list_boards().await? {
        let items = service.list_items_by_board(&board).await?;
        summaries.push(BoardSummary {
            items: items.len(),
            completed: items.iter().filter(|item| item.completed).count(),
            board,
        });
    }
    Ok(summaries)
}

pub fn boards_table(summaries: &[BoardSummary]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec!["ID", "Name", "Items", "Done", "Created"]);

    for summary in summaries {
        table.add_row(vec![
            summary.board.id.clone(),
            summary.board.name.clone(),
            summary.items.to_string(),
            summary.completed.to_string(),
            summary.board.created_at.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }

    table
}

/// Markdown export of the board matching `key` by id, else by name
pub async fn export_board(service: &BoardService, key: &str) -> Result<String> {
    let boards = service.list_boards().await?;
    let board = boards
        .iter()
        .find(|board| board.id == key)
        .or_else(|| boards.iter().find(|board| board.name == key))
        .ok_or_else(|| anyhow!("Board not found: {}", key))?;

    let items = service.list_items_by_board(board).await?;
    Ok(items_to_markdown(&board.name, &items))
}
