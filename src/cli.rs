//! Command-line interface for strictly_chess.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Chess - terminal chessboard with save and load
#[derive(Parser, Debug)]
#[command(name = "strictly_chess")]
#[command(about = "Terminal chessboard backed by a rules engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file (defaults are used if it does not exist)
    #[arg(short, long, global = true, default_value = "strictly_chess.toml")]
    pub config: PathBuf,

    /// Override the database path from the configuration file
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play on the interactive board
    Play,

    /// Print the saved game without starting the board
    Saved,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_play_with_overrides() {
        let cli = Cli::try_parse_from([
            "strictly_chess",
            "play",
            "--db-path",
            "other.db",
            "--config",
            "custom.toml",
        ])
        .unwrap();
        assert_eq!(cli.command, Command::Play);
        assert_eq!(cli.db_path.as_deref(), Some("other.db"));
        assert_eq!(cli.config, PathBuf::from("custom.toml"));
    }

    #[test]
    fn saved_uses_default_config_path() {
        let cli = Cli::try_parse_from(["strictly_chess", "saved"]).unwrap();
        assert_eq!(cli.command, Command::Saved);
        assert_eq!(cli.config, PathBuf::from("strictly_chess.toml"));
        assert!(cli.db_path.is_none());
    }
}
