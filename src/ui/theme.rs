//! Centralized theme/styling system for form widgets
//!
//! The Theme provides all colors used by widgets, ensuring consistent
//! styling across the form window.

use crate::terminal::Color;

/// Centralized theme for all widget colors
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    // Window/frame colors
    pub window_fg: Color,
    pub window_bg: Color,
    pub window_border_fg: Color,
    pub window_border_bg: Color,
    pub window_title_fg: Color,
    pub window_title_bg: Color,
    pub close_box_fg: Color,
    pub close_box_bg: Color,
    /// Area outside the frame when the frame is smaller than the terminal
    pub desktop_fg: Color,
    pub desktop_bg: Color,

    // Text element colors
    pub title_fg: Color,
    pub title_bg: Color,
    pub label_fg: Color,
    pub label_bg: Color,

    // Button colors
    pub button_fg: Color,
    pub button_bg: Color,
    pub button_focused_fg: Color,
    pub button_focused_bg: Color,

    // ListView / dropdown colors
    pub list_fg: Color,
    pub list_bg: Color,
    pub list_selected_fg: Color,
    pub list_selected_bg: Color,
    pub list_focused_selected_fg: Color,
    pub list_focused_selected_bg: Color,
    pub list_cursor_fg: Color,
    pub list_cursor_bg: Color,
    pub list_border_fg: Color,
    pub list_border_bg: Color,

    // Scrollbar colors
    pub scrollbar_track_fg: Color,
    pub scrollbar_track_bg: Color,
    pub scrollbar_thumb_fg: Color,
    pub scrollbar_thumb_bg: Color,
    pub scrollbar_arrow_fg: Color,
    pub scrollbar_arrow_bg: Color,

    // Checkbox/Radio colors
    pub checkbox_fg: Color,
    pub checkbox_bg: Color,
    pub checkbox_focused_fg: Color,
    pub checkbox_focused_bg: Color,
    pub checkbox_checked_char: char,
    pub checkbox_unchecked_char: char,
    pub radio_selected_char: char,
    pub group_border_fg: Color,
    pub group_border_bg: Color,
}

impl Theme {
    /// Classic light-gray dialog look
    pub fn form() -> Self {
        Self {
            window_fg: Color::Black,
            window_bg: Color::LightGray,
            window_border_fg: Color::White,
            window_border_bg: Color::LightGray,
            window_title_fg: Color::Black,
            window_title_bg: Color::LightGray,
            close_box_fg: Color::Black,
            close_box_bg: Color::LightGray,
            desktop_fg: Color::LightGray,
            desktop_bg: Color::Blue,

            title_fg: Color::Blue,
            title_bg: Color::LightGray,
            label_fg: Color::Black,
            label_bg: Color::LightGray,

            button_fg: Color::Black,
            button_bg: Color::LightGray,
            button_focused_fg: Color::White,
            button_focused_bg: Color::Black,

            list_fg: Color::Black,
            list_bg: Color::White,
            list_selected_fg: Color::Black,
            list_selected_bg: Color::LightGray,
            list_focused_selected_fg: Color::White,
            list_focused_selected_bg: Color::Blue,
            list_cursor_fg: Color::Black,
            list_cursor_bg: Color::LightCyan,
            list_border_fg: Color::Black,
            list_border_bg: Color::LightGray,

            scrollbar_track_fg: Color::LightGray,
            scrollbar_track_bg: Color::Blue,
            scrollbar_thumb_fg: Color::Black,
            scrollbar_thumb_bg: Color::LightGray,
            scrollbar_arrow_fg: Color::Black,
            scrollbar_arrow_bg: Color::LightGray,

            checkbox_fg: Color::Black,
            checkbox_bg: Color::LightGray,
            checkbox_focused_fg: Color::White,
            checkbox_focused_bg: Color::Black,
            checkbox_checked_char: 'X',
            checkbox_unchecked_char: ' ',
            radio_selected_char: '•',
            group_border_fg: Color::DarkGray,
            group_border_bg: Color::LightGray,
        }
    }

    /// Dark variant for terminals with dark backgrounds
    pub fn dark() -> Self {
        Self {
            window_fg: Color::LightGray,
            window_bg: Color::Black,
            window_border_fg: Color::LightCyan,
            window_border_bg: Color::Black,
            window_title_fg: Color::White,
            window_title_bg: Color::Black,
            close_box_fg: Color::LightRed,
            close_box_bg: Color::Black,
            desktop_fg: Color::DarkGray,
            desktop_bg: Color::Black,

            title_fg: Color::Yellow,
            title_bg: Color::Black,
            label_fg: Color::LightGray,
            label_bg: Color::Black,

            button_fg: Color::LightGray,
            button_bg: Color::Black,
            button_focused_fg: Color::Black,
            button_focused_bg: Color::LightCyan,

            list_fg: Color::LightGray,
            list_bg: Color::DarkGray,
            list_selected_fg: Color::White,
            list_selected_bg: Color::Blue,
            list_focused_selected_fg: Color::Black,
            list_focused_selected_bg: Color::LightCyan,
            list_cursor_fg: Color::Black,
            list_cursor_bg: Color::Cyan,
            list_border_fg: Color::DarkGray,
            list_border_bg: Color::Black,

            scrollbar_track_fg: Color::DarkGray,
            scrollbar_track_bg: Color::Black,
            scrollbar_thumb_fg: Color::Cyan,
            scrollbar_thumb_bg: Color::Black,
            scrollbar_arrow_fg: Color::LightGray,
            scrollbar_arrow_bg: Color::DarkGray,

            checkbox_fg: Color::LightGray,
            checkbox_bg: Color::Black,
            checkbox_focused_fg: Color::Black,
            checkbox_focused_bg: Color::LightCyan,
            checkbox_checked_char: 'X',
            checkbox_unchecked_char: ' ',
            radio_selected_char: '•',
            group_border_fg: Color::DarkGray,
            group_border_bg: Color::Black,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::form()
    }
}
