//! Strictly Chess library - a chessboard front end over a rules engine
//!
//! The board never decides what is legal. Every rule question goes to a
//! [`GameEngine`]; this crate turns the answers into something to draw and
//! turns clicks and key presses back into engine calls.
//!
//! # Architecture
//!
//! - **Controller**: [`ChessController`] applies each [`UiEvent`] and re-derives the view
//! - **Selection**: two-click move entry ([`SelectionController`])
//! - **View**: board and status view-models rebuilt from the engine after every change
//! - **Persistence**: save and load through a [`KeyValueStore`] (SQLite or in-memory)
//! - **TUI**: ratatui rendering and crossterm input
//!
//! # Example
//!
//! ```
//! use strictly_chess::{ChessController, MemoryStore, ShakmatyEngine, UiEvent};
//!
//! let mut controller = ChessController::new(ShakmatyEngine::new(), MemoryStore::new());
//! controller.handle(UiEvent::SquareClicked("e2".parse().unwrap()));
//! controller.handle(UiEvent::SquareClicked("e4".parse().unwrap()));
//! assert_eq!(controller.status().turn_label(), "Black to move");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod controller;
mod db;
mod persistence;
mod selection;
mod tui;
mod view;

// Crate-level exports - Configuration
pub use config::{ChessConfig, ConfigError};

// Crate-level exports - Controller
pub use controller::{ChessController, Notice, UiEvent};

// Crate-level exports - Database
pub use db::{DbError, DbErrorKind, KvEntry, KvRepository, NewKvEntry};

// Crate-level exports - Persistence
pub use persistence::{
    HISTORY_KEY, KeyValueStore, LoadOutcome, MemoryStore, POSITION_KEY, PersistError,
    PersistedGame, PersistenceAdapter,
};

// Crate-level exports - Selection
pub use selection::{ClickOutcome, SelectionController, SelectionState};

// Crate-level exports - Terminal UI
pub use tui::{
    App, KeyAction, SQUARE_HEIGHT, SQUARE_WIDTH, coord_at, draw, event_loop, key_action,
    move_cursor, run_tui,
};

// Crate-level exports - View-models
pub use view::{
    GameOverModal, HistoryEntry, PieceView, SquareShade, SquareView, StatusPanel,
    TerminalStatus, accessibility_label, board_view, glyph,
};

// Crate-level exports - Engine
pub use strictly_chess_engine::{
    BoardGrid, Coord, CoordParseError, DEFAULT_PROMOTION, EngineError, GameEngine, Piece,
    PieceColor, PieceKind, ShakmatyEngine,
};
