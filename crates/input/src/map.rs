//! Key mapping from terminal events to shell actions.

use crate::types::ShellAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to shell actions.
pub fn handle_key_event(key: KeyEvent) -> Option<ShellAction> {
    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Some(ShellAction::Left),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => Some(ShellAction::Right),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Some(ShellAction::Up),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Some(ShellAction::Down),

        KeyCode::Enter | KeyCode::Char(' ') => Some(ShellAction::Select),
        KeyCode::Char('x') | KeyCode::Char('X') => Some(ShellAction::Cancel),
        KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B') => Some(ShellAction::Back),

        // Game actions
        KeyCode::Char('?') | KeyCode::Char('i') | KeyCode::Char('I') => Some(ShellAction::Hint),
        KeyCode::Char('u') | KeyCode::Char('U') => Some(ShellAction::Undo),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(ShellAction::Draw),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(ShellAction::Shuffle),
        KeyCode::Char('f') | KeyCode::Char('F') => Some(ShellAction::Difficulty),

        // Restart
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('r') | KeyCode::Char('R') => {
            Some(ShellAction::NewGame)
        }

        // Sudoku entry
        KeyCode::Char(c @ '1'..='9') => Some(ShellAction::Digit(c as u8 - b'0')),
        KeyCode::Char('0') | KeyCode::Backspace | KeyCode::Delete => Some(ShellAction::Erase),

        _ => None,
    }
}

/// Check if key should quit the parlor.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_cursor_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(ShellAction::Left)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Down)),
            Some(ShellAction::Down)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('K'))),
            Some(ShellAction::Up)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('l'))),
            Some(ShellAction::Right)
        );
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Enter)),
            Some(ShellAction::Select)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(ShellAction::Select)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('?'))),
            Some(ShellAction::Hint)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('u'))),
            Some(ShellAction::Undo)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Esc)),
            Some(ShellAction::Back)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('R'))),
            Some(ShellAction::NewGame)
        );
    }

    #[test]
    fn test_digit_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('1'))),
            Some(ShellAction::Digit(1))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('9'))),
            Some(ShellAction::Digit(9))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Backspace)),
            Some(ShellAction::Erase)
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
