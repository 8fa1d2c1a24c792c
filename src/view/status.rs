//! Status panel: turn, history and end-of-game state.

use derive_getters::Getters;
use strictly_chess_engine::{GameEngine, PieceColor};
use tracing::instrument;

/// End-of-game condition, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalStatus {
    /// Side to move is checkmated.
    Checkmate,
    /// Side to move has no legal move and is not in check.
    Stalemate,
    /// Side to move is in check. Informational only.
    Check,
    /// Nothing to report.
    Ongoing,
}

impl TerminalStatus {
    /// Resolves engine flags: checkmate, then stalemate, then check.
    pub fn from_flags(checkmate: bool, stalemate: bool, check: bool) -> Self {
        if checkmate {
            TerminalStatus::Checkmate
        } else if stalemate {
            TerminalStatus::Stalemate
        } else if check {
            TerminalStatus::Check
        } else {
            TerminalStatus::Ongoing
        }
    }

    /// Queries the engine.
    pub fn of<E: GameEngine + ?Sized>(engine: &E) -> Self {
        Self::from_flags(engine.is_checkmate(), engine.is_stalemate(), engine.is_check())
    }

    /// Checkmate or stalemate.
    pub fn is_game_over(self) -> bool {
        matches!(self, TerminalStatus::Checkmate | TerminalStatus::Stalemate)
    }
}

/// One numbered line of the move history.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct HistoryEntry {
    number: usize,
    san: String,
}

impl std::fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {}", self.number, self.san)
    }
}

/// Blocking end-of-game dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOverModal {
    message: &'static str,
}

impl GameOverModal {
    /// Label of the only action the dialog offers.
    pub const RESTART_LABEL: &'static str = "Restart";

    /// Dialog for a terminal status. `None` unless the game is over.
    pub fn for_status(status: TerminalStatus) -> Option<Self> {
        if !status.is_game_over() {
            return None;
        }
        let message = match status {
            TerminalStatus::Checkmate => "Checkmate! Game Over.",
            _ => "Stalemate! Game Over.",
        };
        Some(Self { message })
    }

    /// Text shown in the dialog.
    pub fn message(&self) -> &'static str {
        self.message
    }
}

/// Turn indicator, move list and terminal state, as last derived from the engine.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct StatusPanel {
    turn: PieceColor,
    history: Vec<HistoryEntry>,
    terminal: TerminalStatus,
}

impl StatusPanel {
    /// Rebuilds the whole panel from the engine.
    #[instrument(skip_all)]
    pub fn from_engine<E: GameEngine + ?Sized>(engine: &E) -> Self {
        let history = engine
            .history()
            .into_iter()
            .enumerate()
            .map(|(i, san)| HistoryEntry { number: i + 1, san })
            .collect();
        Self {
            turn: engine.turn(),
            history,
            terminal: TerminalStatus::of(engine),
        }
    }

    /// Turn indicator text.
    pub fn turn_label(&self) -> String {
        format!("{} to move", self.turn.label())
    }

    /// Non-modal check warning.
    pub fn check_notice(&self) -> Option<&'static str> {
        (self.terminal == TerminalStatus::Check).then_some("Check!")
    }

    /// End-of-game dialog, if the game is over.
    pub fn modal(&self) -> Option<GameOverModal> {
        GameOverModal::for_status(self.terminal)
    }
}
