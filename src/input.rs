//! Keyboard mapping for the game screen.

use crate::core::logic::GameInput;
use crossterm::event::KeyCode;

/// Translate a key press into a UI-agnostic game input.
pub fn map_key(code: KeyCode) -> GameInput {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => GameInput::Left,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => GameInput::Right,
        KeyCode::Up | KeyCode::Char(' ') | KeyCode::Char('w') | KeyCode::Char('W') => {
            GameInput::Jump
        }
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => GameInput::Quit,
        _ => GameInput::Other,
    }
}
