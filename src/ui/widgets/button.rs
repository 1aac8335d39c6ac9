//! Button widget - a clickable button

use crate::input::InputEvent;
use crate::screen::Screen;
use crate::ui::layout::{Rect, SizeHint};
use crate::ui::theme::Theme;
use crate::ui::widget::{mouse_position, EventResult};
use crate::ui::widget_tree::TreeWidget;
use unicode_width::UnicodeWidthStr;

/// A clickable button widget
#[derive(Clone, Debug)]
pub struct Button {
    /// Button label
    label: String,
    /// Whether widget has focus
    focused: bool,
    /// Action name reported on activation
    action_name: String,
}

impl Button {
    pub fn new(label: impl Into<String>, action_name: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            focused: false,
            action_name: action_name.into(),
        }
    }

    /// Get the label
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn action_name(&self) -> &str {
        &self.action_name
    }

    /// Width of `< label >`
    pub fn display_width(&self) -> usize {
        self.label.width() + 4
    }
}

impl TreeWidget for Button {
    fn draw(&self, screen: &mut Screen, bounds: Rect, theme: &Theme) {
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }

        let (fg, bg) = if self.focused {
            (theme.button_focused_fg, theme.button_focused_bg)
        } else {
            (theme.button_fg, theme.button_bg)
        };

        let text = format!("< {} >", self.label);
        let right = bounds.x + bounds.width;
        let mut col = bounds.x;
        for ch in text.chars() {
            if col >= right {
                break;
            }
            screen.set(bounds.y, col, ch, fg, bg);
            col += 1;
        }
    }

    fn handle_event(&mut self, event: &InputEvent, bounds: Rect) -> EventResult {
        if self.focused && matches!(event, InputEvent::Enter | InputEvent::Char(' ')) {
            return EventResult::Action(self.action_name.clone());
        }

        match (event, mouse_position(event)) {
            (InputEvent::MouseClick { .. }, Some((row, col))) if bounds.contains(row, col) => {
                EventResult::Action(self.action_name.clone())
            }
            _ => EventResult::Ignored,
        }
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint {
            min_width: self.display_width() as u16,
            min_height: 1,
            flex: 0,
        }
    }

    fn focusable(&self) -> bool {
        true
    }

    fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn wants_tight_width(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
