//! Shared scrollbar drawing and interaction logic
//!
//! Used by the form's outer scroll region and by list boxes that scroll
//! internally.

use super::theme::Theme;
use crate::screen::Screen;
use crate::terminal::Color;

/// State needed to render and interact with a scrollbar
#[derive(Clone, Debug)]
pub struct ScrollbarState {
    /// Current scroll position (0-based)
    pub scroll_pos: usize,
    /// Total content size in rows
    pub content_size: usize,
    /// Visible rows
    pub visible_size: usize,
}

impl ScrollbarState {
    pub fn new(scroll_pos: usize, content_size: usize, visible_size: usize) -> Self {
        Self {
            scroll_pos,
            content_size,
            visible_size,
        }
    }

    /// Maximum scroll position (content_size - visible_size)
    pub fn max_scroll(&self) -> usize {
        self.content_size.saturating_sub(self.visible_size)
    }

    /// Calculate thumb position within track (0 to track_size-1)
    pub fn thumb_pos(&self, track_size: usize) -> usize {
        if track_size == 0 {
            return 0;
        }
        let max_scroll = self.max_scroll();
        if max_scroll == 0 {
            return 0;
        }
        let pos = (self.scroll_pos.min(max_scroll) * (track_size - 1)) / max_scroll;
        pos.min(track_size - 1)
    }
}

/// Result of clicking on a scrollbar
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScrollAction {
    /// Scroll up by N rows
    ScrollBack(usize),
    /// Scroll down by N rows
    ScrollForward(usize),
    PageBack,
    PageForward,
    /// Start dragging the thumb
    StartDrag,
    /// Click outside the scrollbar
    None,
}

/// Scrollbar colors
#[derive(Clone, Copy, Debug)]
pub struct ScrollbarColors {
    pub track_fg: Color,
    pub track_bg: Color,
    pub arrow_fg: Color,
    pub arrow_bg: Color,
    pub thumb_fg: Color,
    pub thumb_bg: Color,
}

impl ScrollbarColors {
    pub fn from_theme(theme: &Theme) -> Self {
        Self {
            track_fg: theme.scrollbar_track_fg,
            track_bg: theme.scrollbar_track_bg,
            arrow_fg: theme.scrollbar_arrow_fg,
            arrow_bg: theme.scrollbar_arrow_bg,
            thumb_fg: theme.scrollbar_thumb_fg,
            thumb_bg: theme.scrollbar_thumb_bg,
        }
    }
}

/// Draw a vertical scrollbar
///
/// * `col` - Column to draw the scrollbar
/// * `start_row` - First row (will contain up arrow)
/// * `end_row` - Last row (will contain down arrow)
pub fn draw_vertical(
    screen: &mut Screen,
    col: u16,
    start_row: u16,
    end_row: u16,
    state: &ScrollbarState,
    colors: &ScrollbarColors,
) {
    let height = end_row.saturating_sub(start_row) + 1;
    if height < 3 {
        return;
    }

    screen.set(start_row, col, '↑', colors.arrow_fg, colors.arrow_bg);
    screen.set(end_row, col, '↓', colors.arrow_fg, colors.arrow_bg);

    for r in (start_row + 1)..end_row {
        screen.set(r, col, '░', colors.track_fg, colors.track_bg);
    }

    let track_size = (height - 2) as usize;
    if state.content_size >= 1 {
        let thumb_row = start_row + 1 + state.thumb_pos(track_size) as u16;
        if thumb_row < end_row {
            screen.set(thumb_row, col, '█', colors.thumb_fg, colors.thumb_bg);
        }
    }
}

/// Classify a click on a vertical scrollbar spanning `start_row..=end_row`
pub fn handle_vscroll_click(click_row: u16, start_row: u16, end_row: u16, state: &ScrollbarState) -> ScrollAction {
    if click_row < start_row || click_row > end_row {
        return ScrollAction::None;
    }

    if click_row == start_row {
        return ScrollAction::ScrollBack(1);
    }
    if click_row == end_row {
        return ScrollAction::ScrollForward(1);
    }

    let track_size = end_row.saturating_sub(start_row).saturating_sub(1) as usize;
    if track_size < 1 {
        return ScrollAction::None;
    }

    let thumb_row = start_row + 1 + state.thumb_pos(track_size) as u16;

    if click_row == thumb_row {
        ScrollAction::StartDrag
    } else if click_row < thumb_row {
        ScrollAction::PageBack
    } else {
        ScrollAction::PageForward
    }
}

/// Calculate new scroll position from drag position on vertical scrollbar
///
/// * `drag_row` - Current mouse row during drag
/// * `start_row` / `end_row` - Rows of the arrows bracketing the track
pub fn drag_to_vscroll(drag_row: u16, start_row: u16, end_row: u16, state: &ScrollbarState) -> usize {
    let track_start = start_row + 1;
    // Must match draw_vertical: height - 2
    let track_size = end_row.saturating_sub(start_row).saturating_sub(1) as usize;

    let max_scroll = state.max_scroll();
    if track_size <= 1 || max_scroll == 0 {
        return 0;
    }

    let track_pos = (drag_row.saturating_sub(track_start) as usize).min(track_size - 1);
    (track_pos * max_scroll / (track_size - 1)).min(max_scroll)
}
