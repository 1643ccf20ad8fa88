// ABOUTME: Raw-mode terminal setup and teardown for the TUI
// ABOUTME: A failed setup step undoes the steps that already ran

use anyhow::{Context, Result};
use crossterm::{cursor, execute, terminal};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::Stdout;
use tracing::warn;

pub type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Enable raw mode and switch to the alternate screen.
///
/// Raw mode is turned back off if any later step fails, so the shell is
/// never left in raw mode by a half-finished setup.
pub fn enter() -> Result<CrosstermTerminal> {
    terminal::enable_raw_mode().context("Failed to enable raw mode")?;

    setup_or_restore(
        || {
            let mut stdout = std::io::stdout();
            execute!(stdout, terminal::EnterAlternateScreen)
                .context("Failed to enter alternate screen")?;
            Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
        },
        restore,
    )
}

/// Disable raw mode, leave the alternate screen and show the cursor
pub fn restore() -> Result<()> {
    terminal::disable_raw_mode()?;
    execute!(std::io::stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;
    Ok(())
}

/// Run `setup`; when it fails, run `restore` before handing back the error
pub fn setup_or_restore<T, S, R>(setup: S, restore: R) -> Result<T>
where
    S: FnOnce() -> Result<T>,
    R: FnOnce() -> Result<()>,
{
    match setup() {
        Ok(value) => Ok(value),
        Err(err) => {
            if let Err(restore_err) = restore() {
                warn!("Terminal restore after failed setup: {}", restore_err);
            }
            Err(err)
        }
    }
}
