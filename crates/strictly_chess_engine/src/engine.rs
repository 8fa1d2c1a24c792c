//! The capability interface the UI consumes.
//!
//! The UI never touches board state directly. Everything it shows is read
//! back through this trait, and every mutation goes through `apply_move`,
//! `apply_san`, `undo` or `reset`.

use tracing::{debug, instrument};

use crate::types::{BoardGrid, Coord, PieceColor, PieceKind};

/// Promotion piece used when the caller does not pick one.
pub const DEFAULT_PROMOTION: PieceKind = PieceKind::Queen;

/// Error reported by an engine when a move or notation is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// No legal move connects the two squares.
    IllegalMove {
        /// Source square.
        from: Coord,
        /// Destination square.
        to: Coord,
    },

    /// Text is not valid algebraic move notation.
    InvalidNotation {
        /// Offending text.
        san: String,
    },

    /// Notation parsed but does not describe a legal move in the current position.
    IllegalNotation {
        /// Offending move text.
        san: String,
    },

    /// A recorded move sequence could not be replayed.
    ReplayFailed {
        /// Zero-based index of the failing move.
        index: usize,
        /// The failing move text.
        san: String,
    },
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::IllegalMove { from, to } => write!(f, "Illegal move {} -> {}", from, to),
            EngineError::InvalidNotation { san } => write!(f, "Invalid move notation '{}'", san),
            EngineError::IllegalNotation { san } => {
                write!(f, "Move '{}' is not legal in the current position", san)
            }
            // Numbered from 1 for display.
            EngineError::ReplayFailed { index, san } => {
                write!(f, "Move {} ('{}') could not be replayed", index + 1, san)
            }
        }
    }
}

impl std::error::Error for EngineError {}

/// Chess rules engine as seen by the UI.
pub trait GameEngine {
    /// Current board occupancy.
    fn current_board(&self) -> BoardGrid;

    /// Legal destination squares for the piece on `from`, in engine order, without duplicates.
    ///
    /// Empty when `from` is empty, holds an opponent piece, or the piece cannot move.
    fn legal_moves(&self, from: Coord) -> Vec<Coord>;

    /// Plays the move `from -> to`. A pawn reaching the last rank promotes to
    /// `promotion`, or [`DEFAULT_PROMOTION`] when `None`.
    ///
    /// Returns the move in standard algebraic notation.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::IllegalMove`] and leaves the position untouched
    /// when no legal move matches.
    fn apply_move(
        &mut self,
        from: Coord,
        to: Coord,
        promotion: Option<PieceKind>,
    ) -> Result<String, EngineError>;

    /// Plays a move given in standard algebraic notation.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidNotation`] or [`EngineError::IllegalNotation`]
    /// and leaves the position untouched.
    fn apply_san(&mut self, san: &str) -> Result<String, EngineError>;

    /// Takes back the last move, returning its notation. `None` at the start of the game.
    fn undo(&mut self) -> Option<String>;

    /// Returns to the initial position with an empty history.
    fn reset(&mut self);

    /// Side to move.
    fn turn(&self) -> PieceColor;

    /// The side to move is checkmated.
    fn is_checkmate(&self) -> bool;

    /// The side to move has no legal move and is not in check.
    fn is_stalemate(&self) -> bool;

    /// The side to move is in check.
    fn is_check(&self) -> bool;

    /// Moves played so far, in algebraic notation.
    fn history(&self) -> Vec<String>;

    /// Position encoding (FEN) of the current position.
    fn position_encoding(&self) -> String;

    /// Resets, then replays `moves` in order through [`GameEngine::apply_san`].
    ///
    /// # Errors
    ///
    /// Stops at the first move that cannot be played and returns
    /// [`EngineError::ReplayFailed`]. The moves before it stay applied.
    #[instrument(skip(self, moves), fields(count = moves.len()))]
    fn load_moves(&mut self, moves: &[String]) -> Result<(), EngineError> {
        self.reset();
        for (index, san) in moves.iter().enumerate() {
            if let Err(e) = self.apply_san(san) {
                debug!(index, san = %san, error = %e, "Replay stopped");
                return Err(EngineError::ReplayFailed {
                    index,
                    san: san.clone(),
                });
            }
        }
        debug!("Replay complete");
        Ok(())
    }
}
