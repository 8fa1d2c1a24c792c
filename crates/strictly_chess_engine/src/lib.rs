//! Chess domain types and the engine capability interface.
//!
//! The UI crate talks to chess rules only through [`GameEngine`]. The
//! bundled [`ShakmatyEngine`] implements it on top of `shakmaty`.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod engine;
mod shakmaty_engine;
mod types;

pub use engine::{DEFAULT_PROMOTION, EngineError, GameEngine};
pub use shakmaty_engine::ShakmatyEngine;
pub use types::{BoardGrid, Coord, CoordParseError, Piece, PieceColor, PieceKind};
