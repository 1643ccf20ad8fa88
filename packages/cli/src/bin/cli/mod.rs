use anyhow::Result;
use colored::*;
use std::sync::Arc;
use taskdeck_cli::{board_summaries, boards_table, export_board, open_service, terminal};
use taskdeck_core::Config;
use taskdeck_tui::{App, SystemClipboard};

pub async fn start_tui(config: &Config) -> Result<()> {
    let service = open_service(config).await?;
    let mut app = App::new(Arc::new(service), Arc::new(SystemClipboard)).with_config(config);

    let mut term = terminal::enter()?;

    let result = app.run(&mut term).await;

    // Always restore terminal, even if there was an error
    if let Err(cleanup_error) = terminal::restore() {
        eprintln!("Terminal cleanup error: {}", cleanup_error);
    }

    result
}

pub async fn list_boards(config: &Config) -> Result<()> {
    let service = open_service(config).await?;
    let summaries = board_summaries(&service).await?;

    if summaries.is_empty() {
        println!("{}", "No boards yet. Run `taskdeck` and press `a` to add one.".yellow());
        return Ok(());
    }

    println!("{}", boards_table(&summaries));
    Ok(())
}

pub async fn export(config: &Config, board: &str) -> Result<()> {
    let service = open_service(config).await?;
    print!("{}", export_board(&service, board).await?);
    Ok(())
}
