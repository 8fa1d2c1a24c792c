//! Board view-model: one descriptor per square.

use derive_getters::Getters;
use strictly_chess_engine::{BoardGrid, Coord, Piece, PieceColor, PieceKind};
use tracing::instrument;

use crate::selection::SelectionState;

/// Background shade of a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquareShade {
    /// Light square (a8, h1, ...).
    Light,
    /// Dark square (a1, h8, ...).
    Dark,
}

impl SquareShade {
    /// Shade for a display row and column: light when `(row + col)` is even.
    pub fn at(row: usize, col: usize) -> Self {
        if (row + col) % 2 == 0 {
            SquareShade::Light
        } else {
            SquareShade::Dark
        }
    }
}

/// A piece as drawn: glyph plus a spoken label.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct PieceView {
    piece: Piece,
    glyph: char,
    label: String,
}

impl PieceView {
    /// Creates the view of a piece.
    pub fn new(piece: Piece) -> Self {
        Self {
            piece,
            glyph: glyph(piece),
            label: accessibility_label(piece),
        }
    }
}

/// Everything a backend needs to draw one square and route clicks on it.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct SquareView {
    coord: Coord,
    shade: SquareShade,
    occupant: Option<PieceView>,
    selected: bool,
    highlighted: bool,
}

/// Unicode glyph for a piece.
pub fn glyph(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (PieceColor::White, PieceKind::Pawn) => '♙',
        (PieceColor::White, PieceKind::Rook) => '♖',
        (PieceColor::White, PieceKind::Knight) => '♘',
        (PieceColor::White, PieceKind::Bishop) => '♗',
        (PieceColor::White, PieceKind::Queen) => '♕',
        (PieceColor::White, PieceKind::King) => '♔',
        (PieceColor::Black, PieceKind::Pawn) => '♟',
        (PieceColor::Black, PieceKind::Rook) => '♜',
        (PieceColor::Black, PieceKind::Knight) => '♞',
        (PieceColor::Black, PieceKind::Bishop) => '♝',
        (PieceColor::Black, PieceKind::Queen) => '♛',
        (PieceColor::Black, PieceKind::King) => '♚',
    }
}

/// Spoken label for a piece, e.g. "White Knight".
pub fn accessibility_label(piece: Piece) -> String {
    format!("{} {}", piece.color.label(), piece.kind.label())
}

/// Projects a board snapshot and the current selection into 64 square
/// descriptors, rank 8 to 1 and file a to h.
///
/// The whole grid is rebuilt on every call.
#[instrument(skip_all)]
pub fn board_view(board: &BoardGrid, selection: &SelectionState) -> Vec<SquareView> {
    Coord::all()
        .map(|coord| SquareView {
            coord,
            shade: SquareShade::at(coord.row(), coord.col()),
            occupant: board.get(coord).map(PieceView::new),
            selected: selection.selected() == Some(coord),
            highlighted: selection.is_highlighted(coord),
        })
        .collect()
}
