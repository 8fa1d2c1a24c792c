//! View-models derived from the engine after every change.
//!
//! Nothing here holds game state of its own. The board and the status panel
//! are rebuilt from the engine and the current selection each time.

mod board;
mod status;

pub use board::{PieceView, SquareShade, SquareView, accessibility_label, board_view, glyph};
pub use status::{GameOverModal, HistoryEntry, StatusPanel, TerminalStatus};
