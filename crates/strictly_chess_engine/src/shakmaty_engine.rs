//! [`GameEngine`] backed by the `shakmaty` rules library.

use shakmaty::{
    Chess, Color, EnPassantMode, File, Move, Position, Rank, Role, Square, fen::Fen, san::SanPlus,
};
use tracing::{debug, instrument};

use crate::engine::{DEFAULT_PROMOTION, EngineError, GameEngine};
use crate::types::{BoardGrid, Coord, Piece, PieceColor, PieceKind};

/// A move that has been played, with the position it was played from.
#[derive(Debug, Clone)]
struct PlayedMove {
    before: Chess,
    san: String,
}

/// Standard chess from the initial position, with take-back support.
///
/// `shakmaty` positions are immutable values, so undo is just restoring the
/// position recorded before the last move.
#[derive(Debug, Clone, Default)]
pub struct ShakmatyEngine {
    position: Chess,
    played: Vec<PlayedMove>,
}

impl ShakmatyEngine {
    /// Creates an engine at the initial position.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Plays an already-validated legal move and records it.
    fn play(&mut self, m: &Move) -> String {
        let before = self.position.clone();
        let san = SanPlus::from_move_and_play_unchecked(&mut self.position, m).to_string();
        debug!(san = %san, "Move played");
        self.played.push(PlayedMove {
            before,
            san: san.clone(),
        });
        san
    }
}

fn to_square(coord: Coord) -> Square {
    Square::from_coords(
        File::new(u32::from(coord.file())),
        Rank::new(u32::from(coord.rank())),
    )
}

fn to_coord(square: Square) -> Option<Coord> {
    Coord::from_chars(square.file().char(), square.rank().char())
}

/// Square the moving piece lands on. Castling is encoded by `shakmaty` as
/// king-takes-rook, but the UI addresses it by the king's destination.
fn landing_square(m: &Move) -> Square {
    match m {
        Move::Castle { king, rook } => {
            let file = if rook.file() > king.file() {
                File::G
            } else {
                File::C
            };
            Square::from_coords(file, king.rank())
        }
        _ => m.to(),
    }
}

fn to_kind(role: Role) -> PieceKind {
    match role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    }
}

fn to_role(kind: PieceKind) -> Role {
    match kind {
        PieceKind::Pawn => Role::Pawn,
        PieceKind::Knight => Role::Knight,
        PieceKind::Bishop => Role::Bishop,
        PieceKind::Rook => Role::Rook,
        PieceKind::Queen => Role::Queen,
        PieceKind::King => Role::King,
    }
}

fn to_color(color: Color) -> PieceColor {
    match color {
        Color::White => PieceColor::White,
        Color::Black => PieceColor::Black,
    }
}

impl GameEngine for ShakmatyEngine {
    fn current_board(&self) -> BoardGrid {
        let board = self.position.board();
        let mut grid = BoardGrid::new();
        for coord in Coord::all() {
            let piece = board
                .piece_at(to_square(coord))
                .map(|p| Piece::new(to_color(p.color), to_kind(p.role)));
            grid.set(coord, piece);
        }
        grid
    }

    #[instrument(skip(self))]
    fn legal_moves(&self, from: Coord) -> Vec<Coord> {
        let from_square = to_square(from);
        let mut targets = Vec::new();
        for m in self.position.legal_moves() {
            if m.from() != Some(from_square) {
                continue;
            }
            // Promotions yield one move per piece kind on the same square.
            if let Some(to) = to_coord(landing_square(&m))
                && !targets.contains(&to)
            {
                targets.push(to);
            }
        }
        debug!(count = targets.len(), "Legal destinations computed");
        targets
    }

    #[instrument(skip(self))]
    fn apply_move(
        &mut self,
        from: Coord,
        to: Coord,
        promotion: Option<PieceKind>,
    ) -> Result<String, EngineError> {
        let from_square = to_square(from);
        let target = to_square(to);
        let wanted = to_role(promotion.unwrap_or(DEFAULT_PROMOTION));

        let candidate = self.position.legal_moves().into_iter().find(|m| {
            m.from() == Some(from_square)
                && landing_square(m) == target
                && m.promotion().is_none_or(|role| role == wanted)
        });

        match candidate {
            Some(m) => Ok(self.play(&m)),
            None => {
                debug!("No legal move matches");
                Err(EngineError::IllegalMove { from, to })
            }
        }
    }

    #[instrument(skip(self))]
    fn apply_san(&mut self, san: &str) -> Result<String, EngineError> {
        let parsed: SanPlus = san.trim().parse().map_err(|_| EngineError::InvalidNotation {
            san: san.to_string(),
        })?;
        let m = parsed
            .san
            .to_move(&self.position)
            .map_err(|_| EngineError::IllegalNotation {
                san: san.to_string(),
            })?;
        Ok(self.play(&m))
    }

    #[instrument(skip(self))]
    fn undo(&mut self) -> Option<String> {
        let last = self.played.pop()?;
        self.position = last.before;
        debug!(san = %last.san, "Move taken back");
        Some(last.san)
    }

    #[instrument(skip(self))]
    fn reset(&mut self) {
        self.position = Chess::default();
        self.played.clear();
    }

    fn turn(&self) -> PieceColor {
        to_color(self.position.turn())
    }

    fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    fn is_stalemate(&self) -> bool {
        self.position.is_stalemate()
    }

    fn is_check(&self) -> bool {
        self.position.is_check()
    }

    fn history(&self) -> Vec<String> {
        self.played.iter().map(|p| p.san.clone()).collect()
    }

    fn position_encoding(&self) -> String {
        let setup = self.position.clone().into_setup(EnPassantMode::Legal);
        Fen::from_setup(setup).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_conversion_matches_names() {
        for coord in Coord::all() {
            assert_eq!(to_square(coord).to_string(), coord.to_string());
            assert_eq!(to_coord(to_square(coord)), Some(coord));
        }
    }

    #[test]
    fn castling_lands_on_king_destination() {
        let mut engine = ShakmatyEngine::new();
        for san in ["e4", "e5", "Nf3", "Nc6", "Bc4", "Bc5"] {
            engine.apply_san(san).unwrap();
        }
        let e1: Coord = "e1".parse().unwrap();
        let g1: Coord = "g1".parse().unwrap();
        let h1: Coord = "h1".parse().unwrap();

        let targets = engine.legal_moves(e1);
        assert!(targets.contains(&g1));
        assert!(!targets.contains(&h1));

        assert_eq!(engine.apply_move(e1, g1, None).unwrap(), "O-O");
    }
}
