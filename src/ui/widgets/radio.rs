//! One option row inside a radio group

use crate::screen::Screen;
use crate::ui::theme::Theme;

/// A labelled exclusive option; the owning group keeps exactly one selected
#[derive(Clone, Debug)]
pub struct RadioButton {
    label: String,
    selected: bool,
}

impl RadioButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            selected: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Draw `(•) label` on one row, clipped to `width`
    pub fn draw_row(&self, screen: &mut Screen, row: u16, col: u16, width: u16, highlighted: bool, theme: &Theme) {
        let (fg, bg) = if highlighted {
            (theme.checkbox_focused_fg, theme.checkbox_focused_bg)
        } else {
            (theme.checkbox_fg, theme.checkbox_bg)
        };

        let mark = if self.selected { theme.radio_selected_char } else { ' ' };
        let text = format!("({}) {}", mark, self.label);
        for (i, ch) in text.chars().take(width as usize).enumerate() {
            screen.set(row, col + i as u16, ch, fg, bg);
        }
    }
}
