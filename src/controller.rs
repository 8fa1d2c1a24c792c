//! The single state-transition function behind the board UI.
//!
//! Every user action arrives as a [`UiEvent`]. [`ChessController::handle`]
//! runs it to completion against the engine and then re-derives the status
//! panel, so the view never holds state the engine does not.

use strictly_chess_engine::{Coord, GameEngine};
use tracing::{debug, info, instrument, warn};

use crate::persistence::{KeyValueStore, LoadOutcome, PersistError, PersistenceAdapter};
use crate::selection::{ClickOutcome, SelectionController, SelectionState};
use crate::view::{GameOverModal, SquareView, StatusPanel, board_view};

/// User input, independent of any rendering backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// A square was clicked.
    SquareClicked(Coord),
    /// Start a new game.
    Restart,
    /// Take back one move.
    UndoOne,
    /// Take back two moves (one per side).
    UndoTwo,
    /// Save the game.
    Save,
    /// Load the saved game.
    Load,
}

/// One-line message shown after save or load.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum Notice {
    /// Save succeeded.
    #[display("Game saved ({} moves).", moves)]
    Saved {
        /// Moves in the saved game.
        moves: usize,
    },
    /// Save failed.
    #[display("Save failed: {}", _0)]
    SaveFailed(String),
    /// Load found nothing to restore.
    #[display("No saved game found.")]
    NoSavedGame,
    /// Load succeeded.
    #[display("Game loaded ({} moves).", moves)]
    Loaded {
        /// Moves replayed.
        moves: usize,
    },
    /// Load failed.
    #[display("Load failed: {}", _0)]
    LoadFailed(String),
}

impl Notice {
    /// Whether the notice reports a failure.
    pub fn is_error(&self) -> bool {
        matches!(self, Notice::SaveFailed(_) | Notice::LoadFailed(_))
    }
}

/// Owns the engine, the selection and the store, and dispatches [`UiEvent`]s.
#[derive(Debug)]
pub struct ChessController<E, S> {
    engine: E,
    selection: SelectionController,
    persistence: PersistenceAdapter<S>,
    status: StatusPanel,
    modal: Option<GameOverModal>,
    notice: Option<Notice>,
}

impl<E: GameEngine, S: KeyValueStore> ChessController<E, S> {
    /// Creates a controller over an engine and a store.
    #[instrument(skip_all)]
    pub fn new(engine: E, store: S) -> Self {
        info!("Creating ChessController");
        let status = StatusPanel::from_engine(&engine);
        let modal = status.modal();
        Self {
            engine,
            selection: SelectionController::new(),
            persistence: PersistenceAdapter::new(store),
            status,
            modal,
            notice: None,
        }
    }

    /// The engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The current selection.
    pub fn selection(&self) -> &SelectionState {
        self.selection.state()
    }

    /// Status panel as of the last change.
    pub fn status(&self) -> &StatusPanel {
        &self.status
    }

    /// Open end-of-game dialog, if any.
    pub fn modal(&self) -> Option<&GameOverModal> {
        self.modal.as_ref()
    }

    /// Message from the last save or load, if any.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// The persistence adapter.
    pub fn persistence(&self) -> &PersistenceAdapter<S> {
        &self.persistence
    }

    /// Board descriptors for the current engine snapshot and selection.
    pub fn board(&self) -> Vec<SquareView> {
        board_view(&self.engine.current_board(), self.selection.state())
    }

    /// Applies one user event.
    ///
    /// While the end-of-game dialog is open only [`UiEvent::Restart`] is accepted.
    #[instrument(skip(self))]
    pub fn handle(&mut self, event: UiEvent) {
        if self.modal.is_some() && event != UiEvent::Restart {
            debug!("Ignored while game-over dialog is open");
            return;
        }
        self.notice = None;

        match event {
            UiEvent::SquareClicked(coord) => self.click(coord),
            UiEvent::Restart => self.restart(),
            UiEvent::UndoOne => self.undo(1),
            UiEvent::UndoTwo => self.undo(2),
            UiEvent::Save => self.save(),
            UiEvent::Load => self.load(),
        }
    }

    fn click(&mut self, coord: Coord) {
        if let ClickOutcome::Moved { .. } = self.selection.click(&mut self.engine, coord) {
            self.refresh();
        }
    }

    fn restart(&mut self) {
        info!("Restarting game");
        self.engine.reset();
        self.selection.clear();
        self.refresh();
    }

    fn undo(&mut self, plies: usize) {
        self.selection.clear();
        let mut undone = 0;
        while undone < plies && self.engine.undo().is_some() {
            undone += 1;
        }
        debug!(requested = plies, undone, "Moves taken back");
        self.refresh();
    }

    fn save(&mut self) {
        self.notice = Some(match self.persistence.save(&self.engine) {
            Ok(game) => Notice::Saved {
                moves: game.moves().len(),
            },
            Err(e) => {
                warn!(error = %e, "Save failed");
                Notice::SaveFailed(e.to_string())
            }
        });
    }

    fn load(&mut self) {
        self.selection.clear();
        let result = self.persistence.load(&mut self.engine);
        self.notice = Some(match result {
            Ok(LoadOutcome::NoSavedGame) => {
                info!("Load requested with no saved game");
                Notice::NoSavedGame
            }
            Ok(LoadOutcome::Restored { moves }) => {
                self.refresh();
                Notice::Loaded { moves }
            }
            Err(e) => {
                warn!(error = %e, "Load failed");
                // Replay failures leave the engine partly replayed.
                if matches!(e, PersistError::Replay(_)) {
                    self.refresh();
                }
                Notice::LoadFailed(e.to_string())
            }
        });
    }

    /// Re-derives the status panel and dialog from the engine.
    fn refresh(&mut self) {
        self.status = StatusPanel::from_engine(&self.engine);
        self.modal = self.status.modal();
        match (&self.modal, self.status.check_notice()) {
            (Some(modal), _) => info!(message = %modal.message(), "Game over"),
            (None, Some(check)) => info!(turn = %self.status.turn(), "{}", check),
            (None, None) => debug!(turn = %self.status.turn(), "Status refreshed"),
        }
    }
}
