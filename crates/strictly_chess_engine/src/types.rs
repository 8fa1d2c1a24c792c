//! Core domain types for the chessboard.

use serde::{Deserialize, Serialize};
use strum::EnumIter;
use tracing::instrument;

/// Side owning a piece (and the side to move).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum PieceColor {
    /// White moves first.
    White,
    /// Black moves second.
    Black,
}

impl PieceColor {
    /// Display label ("White" / "Black").
    pub fn label(self) -> &'static str {
        match self {
            PieceColor::White => "White",
            PieceColor::Black => "Black",
        }
    }
}

impl std::fmt::Display for PieceColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The six kinds of chess piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum PieceKind {
    /// Pawn.
    Pawn,
    /// Rook.
    Rook,
    /// Knight.
    Knight,
    /// Bishop.
    Bishop,
    /// Queen.
    Queen,
    /// King.
    King,
}

impl PieceKind {
    /// Display label ("Pawn", "Rook", ...).
    pub fn label(self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Rook => "Rook",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        }
    }
}

/// A piece as reported by the engine. Read-only from the UI's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    /// Owning side.
    pub color: PieceColor,
    /// Kind of piece.
    pub kind: PieceKind,
}

impl Piece {
    /// Creates a new piece.
    pub fn new(color: PieceColor, kind: PieceKind) -> Self {
        Self { color, kind }
    }
}

/// Error returned when text is not an algebraic square name.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Invalid square '{}': expected a file a-h followed by a rank 1-8", _0)]
pub struct CoordParseError(pub String);

impl std::error::Error for CoordParseError {}

/// A square coordinate on the 8x8 board.
///
/// Files and ranks are stored zero-based: file 0 is `a`, rank 0 is `1`.
/// Display rows run the other way (row 0 is rank 8), matching how the board
/// is drawn with White at the bottom. The default is `a1`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Coord {
    file: u8,
    rank: u8,
}

impl Coord {
    /// Creates a coordinate from zero-based file and rank. Returns `None` off the board.
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        (file < 8 && rank < 8).then_some(Self { file, rank })
    }

    /// Creates a coordinate from a display row (0 = rank 8) and column (0 = file a).
    pub fn from_row_col(row: usize, col: usize) -> Option<Self> {
        if row >= 8 || col >= 8 {
            return None;
        }
        Self::new(col as u8, 7 - row as u8)
    }

    /// Creates a coordinate from a file letter and rank digit, e.g. `('e', '4')`.
    pub fn from_chars(file: char, rank: char) -> Option<Self> {
        let file = (file.to_ascii_lowercase() as u32).checked_sub('a' as u32)?;
        let rank = (rank as u32).checked_sub('1' as u32)?;
        Self::new(u8::try_from(file).ok()?, u8::try_from(rank).ok()?)
    }

    /// Zero-based file (0 = `a`).
    pub fn file(self) -> u8 {
        self.file
    }

    /// Zero-based rank (0 = rank `1`).
    pub fn rank(self) -> u8 {
        self.rank
    }

    /// Display row, 0 being rank 8.
    pub fn row(self) -> usize {
        7 - self.rank as usize
    }

    /// Display column, 0 being file a.
    pub fn col(self) -> usize {
        self.file as usize
    }

    /// File letter, `'a'..='h'`.
    pub fn file_char(self) -> char {
        char::from(b'a' + self.file)
    }

    /// Rank digit, `'1'..='8'`.
    pub fn rank_char(self) -> char {
        char::from(b'1' + self.rank)
    }

    /// Returns the square shifted by a number of columns and rows in display orientation.
    pub fn step(self, cols: i8, rows: i8) -> Option<Self> {
        let col = self.col() as i8 + cols;
        let row = self.row() as i8 + rows;
        if !(0..8).contains(&col) || !(0..8).contains(&row) {
            return None;
        }
        Self::from_row_col(row as usize, col as usize)
    }

    /// All 64 squares in display order: rank 8 to 1, file a to h within each rank.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Coord { file: col, rank: 7 - row }))
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl std::str::FromStr for Coord {
    type Err = CoordParseError;

    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => {
                Coord::from_chars(file, rank).ok_or_else(|| CoordParseError(s.to_string()))
            }
            _ => Err(CoordParseError(s.to_string())),
        }
    }
}

/// Board occupancy snapshot, indexed by display row then column.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoardGrid {
    squares: [[Option<Piece>; 8]; 8],
}

impl BoardGrid {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the occupant of a square.
    pub fn get(&self, coord: Coord) -> Option<Piece> {
        self.squares[coord.row()][coord.col()]
    }

    /// Sets the occupant of a square.
    pub fn set(&mut self, coord: Coord, piece: Option<Piece>) {
        self.squares[coord.row()][coord.col()] = piece;
    }

    /// Rows in display order, row 0 being rank 8.
    pub fn rows(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.squares
    }

    /// Number of occupied squares.
    pub fn piece_count(&self) -> usize {
        self.squares.iter().flatten().filter(|sq| sq.is_some()).count()
    }
}
