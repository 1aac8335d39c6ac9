//! Vertical scroll region state for content taller than its viewport

use super::layout::Rect;
use super::scrollbar::{self, draw_vertical, ScrollAction, ScrollbarColors, ScrollbarState};
use super::theme::Theme;
use crate::input::InputEvent;
use crate::screen::Screen;

/// Scroll offset plus the extents it is clamped against
#[derive(Clone, Debug, Default)]
pub struct ScrollView {
    offset: usize,
    content_height: usize,
    viewport_height: usize,
    dragging: bool,
}

impl ScrollView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the scrollable extent and clamp the offset into it
    pub fn fit(&mut self, content_height: usize, viewport_height: usize) {
        self.content_height = content_height;
        self.viewport_height = viewport_height;
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn content_height(&self) -> usize {
        self.content_height
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    pub fn max_offset(&self) -> usize {
        self.content_height.saturating_sub(self.viewport_height)
    }

    pub fn needs_scrollbar(&self) -> bool {
        self.content_height > self.viewport_height
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let max = self.max_offset() as isize;
        self.offset = (self.offset as isize + delta).clamp(0, max) as usize;
    }

    fn page(&self) -> isize {
        self.viewport_height.saturating_sub(1).max(1) as isize
    }

    pub fn page_up(&mut self) {
        self.scroll_by(-self.page());
    }

    pub fn page_down(&mut self) {
        self.scroll_by(self.page());
    }

    /// Scroll the least amount that brings rows `top..top+height` into view
    ///
    /// Rows are 0-based content rows. A span taller than the viewport is
    /// aligned to its top.
    pub fn ensure_visible(&mut self, top: usize, height: usize) {
        let bottom = top + height;
        if top < self.offset || height > self.viewport_height {
            self.offset = top;
        } else if bottom > self.offset + self.viewport_height {
            self.offset = bottom - self.viewport_height;
        }
        self.offset = self.offset.min(self.max_offset());
    }

    fn state(&self) -> ScrollbarState {
        ScrollbarState::new(self.offset, self.content_height, self.viewport_height)
    }

    /// Draw the scrollbar in `track` (one column wide) when content overflows
    pub fn draw_scrollbar(&self, screen: &mut Screen, track: Rect, theme: &Theme) {
        if !self.needs_scrollbar() || track.height == 0 {
            return;
        }
        draw_vertical(
            screen,
            track.x,
            track.y,
            track.bottom() - 1,
            &self.state(),
            &ScrollbarColors::from_theme(theme),
        );
    }

    /// Handle wheel, PageUp/PageDown and scrollbar mouse input
    ///
    /// `viewport` is where the content is shown, `track` the scrollbar
    /// column. Returns true when the event was used.
    pub fn handle_event(&mut self, event: &InputEvent, viewport: Rect, track: Rect) -> bool {
        let end_row = track.bottom().saturating_sub(1);

        if self.dragging {
            match *event {
                InputEvent::MouseDrag { row, .. } => {
                    self.offset = scrollbar::drag_to_vscroll(row, track.y, end_row, &self.state());
                    return true;
                }
                InputEvent::MouseRelease { .. } => {
                    self.dragging = false;
                    return true;
                }
                _ => {}
            }
        }

        match *event {
            InputEvent::PageUp => self.page_up(),
            InputEvent::PageDown => self.page_down(),
            InputEvent::ScrollUp { row, col } if viewport.contains(row, col) || track.contains(row, col) => {
                self.scroll_by(-3)
            }
            InputEvent::ScrollDown { row, col } if viewport.contains(row, col) || track.contains(row, col) => {
                self.scroll_by(3)
            }
            InputEvent::MouseClick { row, col } if self.needs_scrollbar() && track.contains(row, col) => {
                match scrollbar::handle_vscroll_click(row, track.y, end_row, &self.state()) {
                    ScrollAction::ScrollBack(n) => self.scroll_by(-(n as isize)),
                    ScrollAction::ScrollForward(n) => self.scroll_by(n as isize),
                    ScrollAction::PageBack => self.page_up(),
                    ScrollAction::PageForward => self.page_down(),
                    ScrollAction::StartDrag => self.dragging = true,
                    ScrollAction::None => {}
                }
            }
            _ => return false,
        }
        true
    }
}
