//! Strictly Chess - terminal chessboard
//!
//! Plays on an interactive board, or prints the saved game.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use strictly_chess::{
    App, ChessConfig, ChessController, GameEngine, KvRepository, LoadOutcome, PersistenceAdapter,
    ShakmatyEngine, StatusPanel, run_tui,
};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = ChessConfig::load_or_default(&cli.config)?;
    if let Some(db_path) = cli.db_path {
        config = config.with_db_path(db_path);
    }

    match cli.command {
        Command::Play => run_play(config),
        Command::Saved => run_saved(config),
    }
}

/// Run the interactive board.
fn run_play(config: ChessConfig) -> Result<()> {
    // Log to a file so output does not interfere with the TUI
    let log_file = std::fs::File::create(config.log_file()).with_context(|| {
        format!("Failed to create log file {}", config.log_file().display())
    })?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(db_path = %config.db_path(), "Starting Strictly Chess");

    let repo = KvRepository::open(config.db_path().clone())?;
    let controller = ChessController::new(ShakmatyEngine::new(), repo);
    run_tui(App::new(controller, *config.show_coordinates()))
}

/// Print the saved game.
#[instrument(skip_all, fields(db_path = %config.db_path()))]
fn run_saved(config: ChessConfig) -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let repo = KvRepository::open(config.db_path().clone())?;
    let adapter = PersistenceAdapter::new(repo);
    let mut engine = ShakmatyEngine::new();

    match adapter.load(&mut engine)? {
        LoadOutcome::NoSavedGame => println!("No saved game found."),
        LoadOutcome::Restored { moves } => {
            info!(moves, "Saved game replayed");
            let status = StatusPanel::from_engine(&engine);
            println!("Position: {}", engine.position_encoding());
            println!("{}", status.turn_label());
            if let Some(check) = status.check_notice() {
                println!("{}", check);
            }
            for entry in status.history() {
                println!("  {}", entry);
            }
            if let Some(modal) = status.modal() {
                println!("{}", modal.message());
            }
        }
    }
    Ok(())
}
