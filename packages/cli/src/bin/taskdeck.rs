use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::process;
use taskdeck_core::Config;

mod cli;

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(about = "Taskdeck - boards, items and tags in your terminal")]
#[command(version)]
struct Cli {
    /// Database file (overrides TASKDECK_DATABASE)
    #[arg(long, global = true)]
    database: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set (overrides TASKDECK_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the terminal user interface (default)
    Tui,
    /// List boards with item counts
    Boards,
    /// Print a board as a Markdown checklist
    Export {
        /// Board id or name
        board: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::from_env()?
        .with_database(cli.database)
        .with_log_level(cli.log_level);

    taskdeck_cli::logging::init_file_logging(&config)?;
    tracing::info!("taskdeck {} starting", env!("CARGO_PKG_VERSION"));

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => cli::start_tui(&config).await,
        Commands::Boards => cli::list_boards(&config).await,
        Commands::Export { board } => cli::export(&config, &board).await,
    }
}
