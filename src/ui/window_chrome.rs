//! Form frame drawing and hit testing
//!
//! The frame is a double-line box with the title centered in the top
//! border and a `[x]` close box near its right corner.

use super::layout::Rect;
use super::theme::Theme;
use crate::screen::Screen;
use unicode_width::UnicodeWidthStr;

/// Width of the close box including brackets: `[x]`
pub const CLOSE_BOX_WIDTH: u16 = 3;

/// Close box starts this many columns left of the frame's right edge
pub const CLOSE_BOX_OFFSET: u16 = 5;

/// Column where the close box starts
fn close_box_col(frame: Rect) -> u16 {
    frame.x + frame.width.saturating_sub(CLOSE_BOX_OFFSET)
}

/// Draw the frame border, title and close box
pub fn draw_frame(screen: &mut Screen, frame: Rect, title: &str, theme: &Theme) {
    screen.fill(frame.y, frame.x, frame.width, frame.height, ' ', theme.window_fg, theme.window_bg);
    screen.draw_double_box(
        frame.y,
        frame.x,
        frame.width,
        frame.height,
        theme.window_border_fg,
        theme.window_border_bg,
    );
    if frame.width <= CLOSE_BOX_OFFSET + 2 {
        return;
    }

    // Title centered in the space left of the close box
    let available = frame.width.saturating_sub(CLOSE_BOX_OFFSET + 2) as usize;
    let title: String = title.chars().take(available.saturating_sub(2)).collect();
    if !title.is_empty() {
        let title_str = format!(" {} ", title);
        let title_x = frame.x + 1 + (available.saturating_sub(title_str.width()) / 2) as u16;
        screen.write_str(frame.y, title_x, &title_str, theme.window_title_fg, theme.window_title_bg);
    }

    screen.write_str(frame.y, close_box_col(frame), "[x]", theme.close_box_fg, theme.close_box_bg);
}

/// Check if a point is on the close box
pub fn is_close_box_click(row: u16, col: u16, frame: Rect) -> bool {
    let btn_col = close_box_col(frame);
    frame.width > CLOSE_BOX_OFFSET + 2 && row == frame.y && col >= btn_col && col < btn_col + CLOSE_BOX_WIDTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_box_hit_test() {
        let frame = Rect::new(1, 1, 40, 10);
        assert!(is_close_box_click(1, 36, frame));
        assert!(is_close_box_click(1, 38, frame));
        assert!(!is_close_box_click(1, 39, frame));
        assert!(!is_close_box_click(2, 36, frame));
    }

    #[test]
    fn test_frame_draws_title_and_close_box() {
        let mut screen = Screen::new(40, 10);
        draw_frame(&mut screen, Rect::new(1, 1, 40, 10), "Survey", &Theme::default());
        let top = screen.row_text(1);
        assert!(top.contains(" Survey "));
        assert!(top.contains("[x]"));
        assert!(top.starts_with('╔'));
    }
}
