//! Application state and logic.

use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use strictly_chess_engine::{Coord, GameEngine};
use tracing::{debug, info, instrument};

use super::input::{KeyAction, key_action, move_cursor};
use super::ui::coord_at;
use crate::controller::{ChessController, UiEvent};
use crate::persistence::KeyValueStore;

/// Main application state: the controller plus terminal-only concerns.
#[derive(Debug)]
pub struct App<E, S> {
    controller: ChessController<E, S>,
    cursor: Coord,
    show_coordinates: bool,
    squares: Rect,
    should_quit: bool,
}

impl<E: GameEngine, S: KeyValueStore> App<E, S> {
    /// Creates a new application with the cursor on e2.
    pub fn new(controller: ChessController<E, S>, show_coordinates: bool) -> Self {
        Self {
            controller,
            cursor: Coord::new(4, 1).unwrap_or_default(),
            show_coordinates,
            squares: Rect::default(),
            should_quit: false,
        }
    }

    /// The controller.
    pub fn controller(&self) -> &ChessController<E, S> {
        &self.controller
    }

    /// Square under the keyboard cursor.
    pub fn cursor(&self) -> Coord {
        self.cursor
    }

    /// Whether rank and file labels are drawn.
    pub fn show_coordinates(&self) -> bool {
        self.show_coordinates
    }

    /// Whether the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Records where the last frame drew the 64 squares, for mouse hit-testing.
    pub fn set_squares(&mut self, squares: Rect) {
        self.squares = squares;
    }

    /// Handles a key press.
    #[instrument(skip(self), fields(code = ?key.code))]
    pub fn on_key(&mut self, key: KeyEvent) {
        match key_action(key) {
            KeyAction::Event(event) => self.controller.handle(event),
            KeyAction::ClickCursor => self.controller.handle(UiEvent::SquareClicked(self.cursor)),
            KeyAction::MoveCursor(code) => {
                self.cursor = move_cursor(self.cursor, code);
                debug!(cursor = %self.cursor, "Cursor moved");
            }
            KeyAction::Quit => {
                info!("User quit");
                self.should_quit = true;
            }
            KeyAction::Nothing => {}
        }
    }

    /// Handles a mouse event. A left press on a square clicks it.
    #[instrument(skip(self), fields(kind = ?mouse.kind, column = mouse.column, row = mouse.row))]
    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if let Some(coord) = coord_at(self.squares, mouse.column, mouse.row) {
            self.cursor = coord;
            self.controller.handle(UiEvent::SquareClicked(coord));
        }
    }
}
