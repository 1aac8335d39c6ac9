//! Dropdown widget - a one-line choice that opens an inline option list

use crate::input::InputEvent;
use crate::screen::Screen;
use crate::ui::layout::{Rect, SizeHint};
use crate::ui::theme::Theme;
use crate::ui::widget::{mouse_position, EventResult};
use crate::ui::widget_tree::TreeWidget;
use unicode_width::UnicodeWidthStr;

/// Single choice from a list of options
///
/// The first option is selected whenever there is one. While open, the
/// options are drawn below the header and the widget grows to fit them,
/// so the surrounding layout moves down instead of being overdrawn.
#[derive(Clone, Debug)]
pub struct Dropdown {
    options: Vec<String>,
    selected: Option<usize>,
    expanded: bool,
    /// Highlighted option while expanded
    cursor: usize,
    max_width: Option<u16>,
    focused: bool,
}

impl Dropdown {
    pub fn new(options: Vec<String>) -> Self {
        let selected = if options.is_empty() { None } else { Some(0) };
        Self {
            options,
            selected,
            expanded: false,
            cursor: 0,
            max_width: None,
            focused: false,
        }
    }

    pub fn with_max_width(mut self, width: u16) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn selection(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_text(&self) -> Option<&str> {
        self.selected.and_then(|i| self.options.get(i)).map(|s| s.as_str())
    }

    pub fn select(&mut self, index: usize) {
        if index < self.options.len() {
            self.selected = Some(index);
            self.cursor = index;
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    fn open(&mut self) {
        if !self.options.is_empty() {
            self.expanded = true;
            self.cursor = self.selected.unwrap_or(0);
        }
    }

    fn commit(&mut self, index: usize) {
        self.select(index);
        self.expanded = false;
    }

    fn handle_key(&mut self, event: &InputEvent) -> EventResult {
        let last = self.options.len().saturating_sub(1);
        if self.expanded {
            match event {
                InputEvent::CursorUp => self.cursor = self.cursor.saturating_sub(1),
                InputEvent::CursorDown => self.cursor = (self.cursor + 1).min(last),
                InputEvent::Home => self.cursor = 0,
                InputEvent::End => self.cursor = last,
                InputEvent::Enter | InputEvent::Char(' ') => self.commit(self.cursor),
                InputEvent::Escape => self.expanded = false,
                _ => return EventResult::Ignored,
            }
            return EventResult::Consumed;
        }

        match (event, self.selected) {
            (InputEvent::Enter | InputEvent::Char(' '), _) => self.open(),
            (InputEvent::CursorUp, Some(i)) => self.select(i.saturating_sub(1)),
            (InputEvent::CursorDown, Some(i)) => self.select((i + 1).min(last)),
            _ => return EventResult::Ignored,
        }
        EventResult::Consumed
    }
}

impl TreeWidget for Dropdown {
    fn draw(&self, screen: &mut Screen, bounds: Rect, theme: &Theme) {
        if bounds.width < 4 || bounds.height == 0 {
            return;
        }

        let (fg, bg) = if self.focused {
            (theme.list_focused_selected_fg, theme.list_focused_selected_bg)
        } else {
            (theme.list_fg, theme.list_bg)
        };

        let inner = bounds.width.saturating_sub(4) as usize;
        let text: String = self.selected_text().unwrap_or("").chars().take(inner).collect();
        screen.fill(bounds.y, bounds.x, bounds.width, 1, ' ', fg, bg);
        screen.write_str(bounds.y, bounds.x + 1, &text, fg, bg);
        screen.write_str(bounds.y, bounds.x + bounds.width - 2, "▼", fg, bg);

        if !self.expanded {
            return;
        }

        for (i, option) in self.options.iter().enumerate() {
            let row = bounds.y + 1 + i as u16;
            if row >= bounds.y + bounds.height {
                break;
            }
            let (fg, bg) = if i == self.cursor {
                (theme.list_cursor_fg, theme.list_cursor_bg)
            } else {
                (theme.list_fg, theme.list_bg)
            };
            let text: String = option.chars().take(inner + 2).collect();
            screen.fill(row, bounds.x, bounds.width, 1, ' ', fg, bg);
            screen.write_str(row, bounds.x + 1, &text, fg, bg);
        }
    }

    fn handle_event(&mut self, event: &InputEvent, bounds: Rect) -> EventResult {
        if self.focused {
            let result = self.handle_key(event);
            if result.is_consumed() {
                return result;
            }
        }

        match (event, mouse_position(event)) {
            (InputEvent::MouseClick { .. }, Some((row, col))) if bounds.contains(row, col) => {
                if row == bounds.y {
                    if self.expanded {
                        self.expanded = false;
                    } else {
                        self.open();
                    }
                } else if self.expanded {
                    self.commit((row - bounds.y - 1) as usize);
                }
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn size_hint(&self) -> SizeHint {
        let widest = self.options.iter().map(|s| s.width()).max().unwrap_or(0) as u16;
        let rows = if self.expanded { self.options.len() as u16 } else { 0 };
        SizeHint {
            min_width: widest.saturating_add(4),
            min_height: 1 + rows,
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
        if !focused {
            self.expanded = false;
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
