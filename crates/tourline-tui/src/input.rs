use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Quit,
    /// Continue past a wait-for-user pause
    Resume,
    /// Cancel the current run and start the tour again
    Restart,
    /// Cancel the current run
    Stop,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> InputAction {
    match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => InputAction::Quit,
        (KeyCode::Esc, _) => InputAction::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => InputAction::Quit,

        (KeyCode::Char(' '), _) | (KeyCode::Enter, _) => InputAction::Resume,

        (KeyCode::Char('r'), KeyModifiers::NONE) => InputAction::Restart,
        (KeyCode::Char('s'), KeyModifiers::NONE) => InputAction::Stop,

        _ => InputAction::None,
    }
}

/// Handle a mouse event; a primary click counts as a continue gesture
pub fn handle_mouse_event(mouse: MouseEvent) -> InputAction {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => InputAction::Resume,
        _ => InputAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(handle_key_event(key(KeyCode::Char('q'))), InputAction::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Esc)), InputAction::Quit);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            InputAction::Quit
        );
    }

    #[test]
    fn test_continue_gestures() {
        assert_eq!(handle_key_event(key(KeyCode::Char(' '))), InputAction::Resume);
        assert_eq!(handle_key_event(key(KeyCode::Enter)), InputAction::Resume);
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left))),
            InputAction::Resume
        );
        assert_eq!(
            handle_mouse_event(mouse(MouseEventKind::Moved)),
            InputAction::None
        );
    }

    #[test]
    fn test_tour_controls() {
        assert_eq!(handle_key_event(key(KeyCode::Char('r'))), InputAction::Restart);
        assert_eq!(handle_key_event(key(KeyCode::Char('s'))), InputAction::Stop);
        assert_eq!(handle_key_event(key(KeyCode::Char('x'))), InputAction::None);
    }
}
