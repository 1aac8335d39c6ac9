//! Spacer widget - flexible empty space

use crate::input::InputEvent;
use crate::screen::Screen;
use crate::ui::layout::{Rect, SizeHint};
use crate::ui::theme::Theme;
use crate::ui::widget::EventResult;
use crate::ui::widget_tree::TreeWidget;

/// Flexible spacer widget
///
/// Placed on both sides of a fixed-width row (the button bar) a pair of
/// spacers centers it.
#[derive(Clone, Debug)]
pub struct Spacer {
    flex: u16,
}

impl Spacer {
    /// Create a new flexible spacer with flex=1
    pub fn new() -> Self {
        Self { flex: 1 }
    }
}

impl Default for Spacer {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeWidget for Spacer {
    fn draw(&self, _screen: &mut Screen, _bounds: Rect, _theme: &Theme) {}

    fn handle_event(&mut self, _event: &InputEvent, _bounds: Rect) -> EventResult {
        EventResult::Ignored
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint {
            min_width: 0,
            min_height: 0,
            flex: self.flex,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
