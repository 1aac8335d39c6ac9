//! ListView widget - a bordered list with single or multiple selection
//!
//! The list is as tall as its option count. With a `max_rows` cap, longer
//! lists scroll internally with their own scrollbar.

use crate::input::InputEvent;
use crate::screen::Screen;
use crate::ui::layout::{Rect, SizeHint};
use crate::ui::scrollbar::{self, draw_vertical, ScrollAction, ScrollbarColors, ScrollbarState};
use crate::ui::theme::Theme;
use crate::ui::widget::{mouse_position, EventResult};
use crate::ui::widget_tree::TreeWidget;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// How many items a list lets the user pick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionMode {
    /// At most one item; starts with nothing selected
    Single,
    /// Any subset of items
    Multiple,
}

/// A scrollable list view widget with border and scrollbar
#[derive(Clone, Debug)]
pub struct ListView {
    items: Vec<String>,
    mode: SelectionMode,
    /// Selected item in single mode
    selected: Option<usize>,
    /// Per-item marks in multiple mode
    marked: Vec<bool>,
    /// Keyboard cursor
    cursor: usize,
    /// First visible item
    scroll_offset: usize,
    max_rows: Option<u16>,
    max_width: Option<u16>,
    focused: bool,
    scrollbar_dragging: bool,
}

impl ListView {
    pub fn new(items: Vec<String>, mode: SelectionMode) -> Self {
        let marked = vec![false; items.len()];
        Self {
            items,
            mode,
            selected: None,
            marked,
            cursor: 0,
            scroll_offset: 0,
            max_rows: None,
            max_width: None,
            focused: false,
            scrollbar_dragging: false,
        }
    }

    /// Rows shown before the list starts scrolling internally
    pub fn with_max_rows(mut self, rows: u16) -> Self {
        self.max_rows = Some(rows.max(1));
        self
    }

    /// Cap the list width regardless of item length
    pub fn with_max_width(mut self, width: u16) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Selected index in single mode
    pub fn selection(&self) -> Option<usize> {
        self.selected
    }

    /// Select one item. In multiple mode this marks it.
    pub fn select(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        match self.mode {
            SelectionMode::Single => self.selected = Some(index),
            SelectionMode::Multiple => self.marked[index] = true,
        }
        self.cursor = index;
        self.ensure_cursor_visible();
    }

    /// Flip an item's mark (multiple mode) or select it (single mode)
    pub fn toggle(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        match self.mode {
            SelectionMode::Single => self.selected = Some(index),
            SelectionMode::Multiple => self.marked[index] = !self.marked[index],
        }
        self.cursor = index;
        self.ensure_cursor_visible();
    }

    pub fn is_marked(&self, index: usize) -> bool {
        match self.mode {
            SelectionMode::Single => self.selected == Some(index),
            SelectionMode::Multiple => self.marked.get(index).copied().unwrap_or(false),
        }
    }

    /// Selected indices in item order
    pub fn selected_indices(&self) -> Vec<usize> {
        (0..self.items.len()).filter(|&i| self.is_marked(i)).collect()
    }

    /// Selected item texts in item order
    pub fn selected_items(&self) -> Vec<&str> {
        self.selected_indices().into_iter().map(|i| self.items[i].as_str()).collect()
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    fn visible_rows(&self) -> usize {
        let rows = match self.max_rows {
            Some(max) => self.items.len().min(max as usize),
            None => self.items.len(),
        };
        rows.max(1)
    }

    fn overflows(&self) -> bool {
        self.items.len() > self.visible_rows()
    }

    fn state(&self) -> ScrollbarState {
        ScrollbarState::new(self.scroll_offset, self.items.len(), self.visible_rows())
    }

    fn ensure_cursor_visible(&mut self) {
        let visible = self.visible_rows();
        if self.cursor < self.scroll_offset {
            self.scroll_offset = self.cursor;
        } else if self.cursor >= self.scroll_offset + visible {
            self.scroll_offset = self.cursor + 1 - visible;
        }
    }

    fn scroll_by(&mut self, delta: isize) {
        let max = self.state().max_scroll() as isize;
        self.scroll_offset = (self.scroll_offset as isize + delta).clamp(0, max) as usize;
    }

    fn move_cursor(&mut self, target: usize) {
        if self.items.is_empty() {
            return;
        }
        self.cursor = target.min(self.items.len() - 1);
        if self.mode == SelectionMode::Single {
            self.selected = Some(self.cursor);
        }
        self.ensure_cursor_visible();
    }

    fn handle_key(&mut self, event: &InputEvent) -> EventResult {
        if self.items.is_empty() {
            return EventResult::Ignored;
        }
        let page = self.visible_rows().saturating_sub(1).max(1);
        let last = self.items.len() - 1;
        match event {
            // The first arrow press on an unselected single list picks the cursor row
            InputEvent::CursorUp | InputEvent::CursorDown
                if self.mode == SelectionMode::Single && self.selected.is_none() =>
            {
                self.move_cursor(self.cursor)
            }
            InputEvent::CursorUp => self.move_cursor(self.cursor.saturating_sub(1)),
            InputEvent::CursorDown => self.move_cursor(self.cursor + 1),
            InputEvent::Home => self.move_cursor(0),
            InputEvent::End => self.move_cursor(last),
            InputEvent::PageUp => self.move_cursor(self.cursor.saturating_sub(page)),
            InputEvent::PageDown => self.move_cursor(self.cursor + page),
            InputEvent::Char(' ') | InputEvent::Enter => self.toggle(self.cursor),
            _ => return EventResult::Ignored,
        }
        EventResult::Consumed
    }
}

impl TreeWidget for ListView {
    fn draw(&self, screen: &mut Screen, bounds: Rect, theme: &Theme) {
        if bounds.width < 3 || bounds.height < 3 {
            return;
        }

        screen.draw_box(bounds.y, bounds.x, bounds.width, bounds.height, theme.list_border_fg, theme.list_border_bg);

        let content = bounds.inset(1);
        let overflows = self.overflows();
        let item_width = if overflows { content.width.saturating_sub(1) } else { content.width };

        for i in 0..content.height as usize {
            let index = self.scroll_offset + i;
            let row = content.y + i as u16;

            let Some(item) = self.items.get(index) else {
                screen.fill(row, content.x, item_width, 1, ' ', theme.list_fg, theme.list_bg);
                continue;
            };

            let marked = self.is_marked(index);
            let at_cursor = self.focused && index == self.cursor;
            let (fg, bg) = match (self.mode, marked, at_cursor) {
                (SelectionMode::Single, true, _) if self.focused => {
                    (theme.list_focused_selected_fg, theme.list_focused_selected_bg)
                }
                (SelectionMode::Single, true, _) => (theme.list_selected_fg, theme.list_selected_bg),
                (_, _, true) => (theme.list_cursor_fg, theme.list_cursor_bg),
                _ => (theme.list_fg, theme.list_bg),
            };

            let text = match self.mode {
                SelectionMode::Single => item.clone(),
                SelectionMode::Multiple => {
                    let mark = if marked { theme.checkbox_checked_char } else { theme.checkbox_unchecked_char };
                    format!("[{}] {}", mark, item)
                }
            };

            screen.fill(row, content.x, item_width, 1, ' ', fg, bg);
            let mut col = content.x;
            let right = content.x + item_width;
            for ch in text.chars() {
                let w = ch.width().unwrap_or(0) as u16;
                if w == 0 {
                    continue;
                }
                if col + w > right {
                    break;
                }
                screen.set(row, col, ch, fg, bg);
                col += w;
            }
        }

        if overflows {
            draw_vertical(
                screen,
                content.x + content.width - 1,
                content.y,
                content.y + content.height - 1,
                &self.state(),
                &ScrollbarColors::from_theme(theme),
            );
        }
    }

    fn handle_event(&mut self, event: &InputEvent, bounds: Rect) -> EventResult {
        let content = bounds.inset(1);
        let start_row = content.y;
        let end_row = content.y + content.height.saturating_sub(1);

        if self.scrollbar_dragging {
            match event {
                InputEvent::MouseDrag { row, .. } => {
                    self.scroll_offset = scrollbar::drag_to_vscroll(*row, start_row, end_row, &self.state());
                    return EventResult::Consumed;
                }
                InputEvent::MouseRelease { .. } => {
                    self.scrollbar_dragging = false;
                    return EventResult::Consumed;
                }
                _ => {}
            }
        }

        if self.focused {
            let result = self.handle_key(event);
            if result.is_consumed() {
                return result;
            }
        }

        let Some((row, col)) = mouse_position(event) else {
            return EventResult::Ignored;
        };
        if !bounds.contains(row, col) {
            return EventResult::Ignored;
        }

        match event {
            InputEvent::ScrollUp { .. } if self.overflows() => {
                self.scroll_by(-3);
                EventResult::Consumed
            }
            InputEvent::ScrollDown { .. } if self.overflows() => {
                self.scroll_by(3);
                EventResult::Consumed
            }
            InputEvent::MouseClick { .. } if self.overflows() && col == content.x + content.width - 1 => {
                let page = self.visible_rows().saturating_sub(1).max(1) as isize;
                match scrollbar::handle_vscroll_click(row, start_row, end_row, &self.state()) {
                    ScrollAction::ScrollBack(n) => self.scroll_by(-(n as isize)),
                    ScrollAction::ScrollForward(n) => self.scroll_by(n as isize),
                    ScrollAction::PageBack => self.scroll_by(-page),
                    ScrollAction::PageForward => self.scroll_by(page),
                    ScrollAction::StartDrag => self.scrollbar_dragging = true,
                    ScrollAction::None => {}
                }
                EventResult::Consumed
            }
            InputEvent::MouseClick { .. } if content.contains(row, col) => {
                let index = self.scroll_offset + (row - content.y) as usize;
                if index < self.items.len() {
                    self.toggle(index);
                }
                EventResult::Consumed
            }
            InputEvent::MouseClick { .. } => EventResult::Consumed,
            _ => EventResult::Ignored,
        }
    }

    fn size_hint(&self) -> SizeHint {
        let widest = self.items.iter().map(|s| s.width()).max().unwrap_or(0) as u16;
        SizeHint {
            min_width: widest.saturating_add(6),
            min_height: self.visible_rows() as u16 + 2,
            flex: 0,
        }
    }

    fn max_width(&self) -> Option<u16> {
        self.max_width
    }

    fn focusable(&self) -> bool {
        true
    }

    fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colors() -> Vec<String> {
        vec!["red".into(), "green".into(), "blue".into()]
    }

    #[test]
    fn test_single_list_starts_unselected() {
        let list = ListView::new(colors(), SelectionMode::Single);
        assert_eq!(list.selection(), None);
        assert!(list.selected_items().is_empty());
    }

    #[test]
    fn test_click_selects_row() {
        let mut list = ListView::new(colors(), SelectionMode::Single);
        let bounds = Rect::new(1, 1, 20, 5);
        // Rows 2..=4 hold the items inside the border
        list.handle_event(&InputEvent::MouseClick { row: 3, col: 4 }, bounds);
        assert_eq!(list.selected_items(), vec!["green"]);
    }

    #[test]
    fn test_multiple_marks_follow_item_order() {
        let mut list = ListView::new(colors(), SelectionMode::Multiple);
        list.toggle(2);
        list.toggle(0);
        list.toggle(1);
        list.toggle(1);
        assert_eq!(list.selected_items(), vec!["red", "blue"]);
    }

    #[test]
    fn test_keyboard_moves_single_selection() {
        let mut list = ListView::new(colors(), SelectionMode::Single);
        list.set_focus(true);
        let bounds = Rect::new(1, 1, 20, 5);
        list.handle_event(&InputEvent::CursorDown, bounds);
        assert_eq!(list.selection(), Some(0));
        list.handle_event(&InputEvent::CursorDown, bounds);
        list.handle_event(&InputEvent::End, bounds);
        assert_eq!(list.selection(), Some(2));
    }

    #[test]
    fn test_list_shows_every_option_by_default() {
        let items: Vec<String> = (0..30).map(|i| format!("item{}", i)).collect();
        let mut list = ListView::new(items, SelectionMode::Single);
        assert_eq!(list.size_hint().min_height, 32);

        list.set_focus(true);
        list.handle_event(&InputEvent::End, Rect::new(1, 1, 20, 32));
        assert_eq!(list.scroll_offset(), 0);
        assert_eq!(list.selection(), Some(29));
    }

    #[test]
    fn test_capped_list_scrolls_internally() {
        let items: Vec<String> = (0..30).map(|i| format!("item{}", i)).collect();
        let mut list = ListView::new(items, SelectionMode::Single).with_max_rows(5);
        assert_eq!(list.size_hint().min_height, 7);

        list.set_focus(true);
        let bounds = Rect::new(1, 1, 20, 7);
        list.handle_event(&InputEvent::End, bounds);
        assert_eq!(list.scroll_offset(), 25);
    }

    #[test]
    fn test_empty_list_has_no_selection() {
        let mut list = ListView::new(Vec::new(), SelectionMode::Multiple);
        list.set_focus(true);
        let result = list.handle_event(&InputEvent::Char(' '), Rect::new(1, 1, 10, 3));
        assert_eq!(result, EventResult::Ignored);
        assert!(list.selected_items().is_empty());
        assert_eq!(list.size_hint().min_height, 3);
    }

    #[test]
    fn test_width_hint_counts_display_cells() {
        let list = ListView::new(vec!["日本語".into(), "ab".into()], SelectionMode::Single);
        // Three wide characters take six cells
        assert_eq!(list.size_hint().min_width, 12);
    }
}
