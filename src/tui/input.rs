//! Key bindings and keyboard cursor movement.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use strictly_chess_engine::Coord;

use crate::controller::UiEvent;

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Forward an event to the controller.
    Event(UiEvent),
    /// Move the keyboard cursor.
    MoveCursor(KeyCode),
    /// Click the square under the cursor.
    ClickCursor,
    /// Leave the application.
    Quit,
    /// Unbound key.
    Nothing,
}

/// Maps a key press to an action.
pub fn key_action(key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
        KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Event(UiEvent::Restart),
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::SHIFT) => {
            KeyAction::Event(UiEvent::UndoTwo)
        }
        KeyCode::Char('U') => KeyAction::Event(UiEvent::UndoTwo),
        KeyCode::Char('u') => KeyAction::Event(UiEvent::UndoOne),
        KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Event(UiEvent::Save),
        KeyCode::Char('l') | KeyCode::Char('L') => KeyAction::Event(UiEvent::Load),
        KeyCode::Enter | KeyCode::Char(' ') => KeyAction::ClickCursor,
        code @ (KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right) => {
            KeyAction::MoveCursor(code)
        }
        _ => KeyAction::Nothing,
    }
}

/// Moves cursor based on arrow keys. Stops at the board edge.
pub fn move_cursor(cursor: Coord, key: KeyCode) -> Coord {
    let (cols, rows) = match key {
        KeyCode::Right => (1, 0),
        KeyCode::Left => (-1, 0),
        KeyCode::Down => (0, 1),
        KeyCode::Up => (0, -1),
        _ => (0, 0),
    };
    cursor.step(cols, rows).unwrap_or(cursor)
}
