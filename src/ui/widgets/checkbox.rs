//! One toggle row inside a checkbox group

use crate::screen::Screen;
use crate::ui::theme::Theme;

/// A labelled on/off toggle
#[derive(Clone, Debug)]
pub struct Checkbox {
    label: String,
    checked: bool,
}

impl Checkbox {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            checked: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    pub fn toggle(&mut self) {
        self.checked = !self.checked;
    }

    /// Draw `[X] label` on one row, clipped to `width`
    pub fn draw_row(&self, screen: &mut Screen, row: u16, col: u16, width: u16, highlighted: bool, theme: &Theme) {
        let (fg, bg) = if highlighted {
            (theme.checkbox_focused_fg, theme.checkbox_focused_bg)
        } else {
            (theme.checkbox_fg, theme.checkbox_bg)
        };
        let mark = if self.checked {
            theme.checkbox_checked_char
        } else {
            theme.checkbox_unchecked_char
        };

        let text = format!("[{}] {}", mark, self.label);
        for (i, ch) in text.chars().take(width as usize).enumerate() {
            screen.set(row, col + i as u16, ch, fg, bg);
        }
    }
}
