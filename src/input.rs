//! Input handling and key event processing

use crate::terminal::{Key, MouseButton, MouseEvent};

/// Processed input events for the form
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Mouse click
    MouseClick { row: u16, col: u16 },
    /// Mouse release
    MouseRelease { row: u16, col: u16 },
    /// Mouse drag (move while button held)
    MouseDrag { row: u16, col: u16 },
    /// Mouse wheel scroll
    ScrollUp { row: u16, col: u16 },
    ScrollDown { row: u16, col: u16 },
    /// Regular character input
    Char(char),
    /// Navigation keys
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    Home,
    End,
    PageUp,
    PageDown,
    Enter,
    Backspace,
    Tab,
    ShiftTab,
    Escape,
    /// Ctrl+C / Ctrl+Q ask the window to close
    CtrlC,
    CtrlQ,
    Unknown,
}

impl From<Key> for InputEvent {
    fn from(key: Key) -> Self {
        match key {
            Key::Char(c) => InputEvent::Char(c),
            Key::Enter => InputEvent::Enter,
            Key::Escape => InputEvent::Escape,
            Key::Backspace => InputEvent::Backspace,
            Key::Tab => InputEvent::Tab,
            Key::ShiftTab => InputEvent::ShiftTab,
            Key::Up => InputEvent::CursorUp,
            Key::Down => InputEvent::CursorDown,
            Key::Left => InputEvent::CursorLeft,
            Key::Right => InputEvent::CursorRight,
            Key::Home => InputEvent::Home,
            Key::End => InputEvent::End,
            Key::PageUp => InputEvent::PageUp,
            Key::PageDown => InputEvent::PageDown,
            Key::Ctrl('c') => InputEvent::CtrlC,
            Key::Ctrl('q') => InputEvent::CtrlQ,
            Key::Mouse(MouseEvent { button: MouseButton::Left, row, col, pressed: true, motion: false }) => {
                InputEvent::MouseClick { row, col }
            }
            Key::Mouse(MouseEvent { button: MouseButton::Left, row, col, pressed: true, motion: true }) => {
                InputEvent::MouseDrag { row, col }
            }
            Key::Mouse(MouseEvent { button: MouseButton::Left, row, col, pressed: false, .. }) => {
                InputEvent::MouseRelease { row, col }
            }
            Key::Mouse(MouseEvent { button: MouseButton::WheelUp, row, col, .. }) => {
                InputEvent::ScrollUp { row, col }
            }
            Key::Mouse(MouseEvent { button: MouseButton::WheelDown, row, col, .. }) => {
                InputEvent::ScrollDown { row, col }
            }
            _ => InputEvent::Unknown,
        }
    }
}

impl InputEvent {
    /// Whether the event asks the window manager to close the window
    pub fn is_close_request(&self) -> bool {
        matches!(self, InputEvent::CtrlC | InputEvent::CtrlQ)
    }

    /// Same event with its mouse position moved by the given offsets
    pub fn translated(&self, d_row: i32, d_col: i32) -> InputEvent {
        let shift = |row: u16, col: u16| {
            (
                (row as i32 + d_row).clamp(0, u16::MAX as i32) as u16,
                (col as i32 + d_col).clamp(0, u16::MAX as i32) as u16,
            )
        };
        match *self {
            InputEvent::MouseClick { row, col } => {
                let (row, col) = shift(row, col);
                InputEvent::MouseClick { row, col }
            }
            InputEvent::MouseRelease { row, col } => {
                let (row, col) = shift(row, col);
                InputEvent::MouseRelease { row, col }
            }
            InputEvent::MouseDrag { row, col } => {
                let (row, col) = shift(row, col);
                InputEvent::MouseDrag { row, col }
            }
            InputEvent::ScrollUp { row, col } => {
                let (row, col) = shift(row, col);
                InputEvent::ScrollUp { row, col }
            }
            InputEvent::ScrollDown { row, col } => {
                let (row, col) = shift(row, col);
                InputEvent::ScrollDown { row, col }
            }
            ref other => other.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translated_moves_mouse_events_only() {
        let click = InputEvent::MouseClick { row: 10, col: 5 };
        assert_eq!(click.translated(-3, 2), InputEvent::MouseClick { row: 7, col: 7 });
        assert_eq!(InputEvent::Enter.translated(-3, 2), InputEvent::Enter);
    }

    #[test]
    fn test_ctrl_keys_are_close_requests() {
        assert!(InputEvent::from(Key::Ctrl('c')).is_close_request());
        assert!(!InputEvent::from(Key::Escape).is_close_request());
    }
}
