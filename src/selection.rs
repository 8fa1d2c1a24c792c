//! Two-click move entry: pick a piece, then pick its destination.

use derive_getters::Getters;
use strictly_chess_engine::{Coord, DEFAULT_PROMOTION, GameEngine};
use tracing::{debug, info, instrument};

/// Transient selection state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionState {
    /// Nothing selected.
    #[default]
    Idle,
    /// A piece is selected and its legal destinations are highlighted.
    Selected {
        /// The selected square.
        from: Coord,
        /// Legal destinations from `from`, as reported by the engine at selection time.
        targets: Vec<Coord>,
    },
}

impl SelectionState {
    /// The selected square, if any.
    pub fn selected(&self) -> Option<Coord> {
        match self {
            SelectionState::Idle => None,
            SelectionState::Selected { from, .. } => Some(*from),
        }
    }

    /// Highlighted destinations. Empty when idle.
    pub fn targets(&self) -> &[Coord] {
        match self {
            SelectionState::Idle => &[],
            SelectionState::Selected { targets, .. } => targets,
        }
    }

    /// Whether `coord` is highlighted: the selected square or one of its destinations.
    pub fn is_highlighted(&self, coord: Coord) -> bool {
        self.selected() == Some(coord) || self.targets().contains(&coord)
    }

    /// All highlighted squares, selected square first.
    pub fn highlighted(&self) -> Vec<Coord> {
        self.selected()
            .into_iter()
            .chain(self.targets().iter().copied())
            .collect()
    }

    /// Whether nothing is selected.
    pub fn is_idle(&self) -> bool {
        matches!(self, SelectionState::Idle)
    }
}

/// What a square click did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Idle click on a square with no legal moves. Nothing changed.
    Ignored,
    /// A piece was selected.
    Selected {
        /// Selected square.
        from: Coord,
        /// Number of highlighted destinations.
        targets: usize,
    },
    /// The engine accepted the move.
    Moved {
        /// Source square.
        from: Coord,
        /// Destination square.
        to: Coord,
        /// Move in algebraic notation.
        san: String,
    },
    /// The engine rejected the move. The board is unchanged.
    Rejected {
        /// Source square.
        from: Coord,
        /// Clicked destination.
        to: Coord,
    },
}

/// Owns the selection and runs the click protocol against an engine.
///
/// A second click always ends the selection, whether or not the engine takes
/// the move. Clicking the selected square again is sent to the engine as a
/// move to that same square, which it rejects.
#[derive(Debug, Clone, Default, Getters)]
pub struct SelectionController {
    state: SelectionState,
}

impl SelectionController {
    /// Creates an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles a click on `coord`.
    #[instrument(skip(self, engine), fields(state = ?self.state))]
    pub fn click<E: GameEngine + ?Sized>(&mut self, engine: &mut E, coord: Coord) -> ClickOutcome {
        match std::mem::take(&mut self.state) {
            SelectionState::Idle => {
                let targets = engine.legal_moves(coord);
                if targets.is_empty() {
                    debug!("No legal moves from square");
                    return ClickOutcome::Ignored;
                }
                let count = targets.len();
                debug!(targets = count, "Square selected");
                self.state = SelectionState::Selected {
                    from: coord,
                    targets,
                };
                ClickOutcome::Selected {
                    from: coord,
                    targets: count,
                }
            }
            SelectionState::Selected { from, .. } => {
                match engine.apply_move(from, coord, Some(DEFAULT_PROMOTION)) {
                    Ok(san) => {
                        info!(%from, to = %coord, san = %san, "Move committed");
                        ClickOutcome::Moved {
                            from,
                            to: coord,
                            san,
                        }
                    }
                    Err(e) => {
                        debug!(error = %e, "Move rejected");
                        ClickOutcome::Rejected { from, to: coord }
                    }
                }
            }
        }
    }

    /// Drops any selection.
    pub fn clear(&mut self) {
        self.state = SelectionState::Idle;
    }
}
