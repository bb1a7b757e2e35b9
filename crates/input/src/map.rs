//! Key mapping from terminal events to grid actions.

use crate::types::GridAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to grid actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GridAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(GridAction::CursorLeft)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(GridAction::CursorRight)
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(GridAction::CursorUp)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(GridAction::CursorDown)
        }

        // Drag
        KeyCode::Char(' ') | KeyCode::Enter => Some(GridAction::Grab),
        KeyCode::Esc | KeyCode::Backspace => Some(GridAction::Cancel),

        KeyCode::Char('p') | KeyCode::Char('P') => Some(GridAction::PlayCue),
        KeyCode::Char('f') | KeyCode::Char('F') => Some(GridAction::Submit),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GridAction::Reset),

        _ => None,
    }
}

/// Check if key should quit the quiz.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Option<GridAction> {
        handle_key_event(KeyEvent::from(code))
    }

    #[test]
    fn test_cursor_keys() {
        assert_eq!(key(KeyCode::Left), Some(GridAction::CursorLeft));
        assert_eq!(key(KeyCode::Right), Some(GridAction::CursorRight));
        assert_eq!(key(KeyCode::Up), Some(GridAction::CursorUp));
        assert_eq!(key(KeyCode::Down), Some(GridAction::CursorDown));

        assert_eq!(key(KeyCode::Char('H')), Some(GridAction::CursorLeft));
        assert_eq!(key(KeyCode::Char('j')), Some(GridAction::CursorDown));
        assert_eq!(key(KeyCode::Char('w')), Some(GridAction::CursorUp));
        assert_eq!(key(KeyCode::Char('D')), Some(GridAction::CursorRight));
    }

    #[test]
    fn test_drag_keys() {
        assert_eq!(key(KeyCode::Char(' ')), Some(GridAction::Grab));
        assert_eq!(key(KeyCode::Enter), Some(GridAction::Grab));
        assert_eq!(key(KeyCode::Esc), Some(GridAction::Cancel));
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(key(KeyCode::Char('p')), Some(GridAction::PlayCue));
        assert_eq!(key(KeyCode::Char('F')), Some(GridAction::Submit));
        assert_eq!(key(KeyCode::Char('r')), Some(GridAction::Reset));
        assert_eq!(key(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_control_chords_are_not_actions() {
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }
}
