//! Framed clusters of toggles: checkbox groups and radio groups

use super::checkbox::Checkbox;
use super::radio::RadioButton;
use crate::input::InputEvent;
use crate::screen::Screen;
use crate::ui::layout::{Rect, SizeHint};
use crate::ui::theme::Theme;
use crate::ui::widget::EventResult;
use crate::ui::widget_tree::TreeWidget;
use unicode_width::UnicodeWidthStr;

/// Box with the title set into the top border
fn draw_frame(screen: &mut Screen, bounds: Rect, title: &str, theme: &Theme) {
    let (fg, bg) = (theme.group_border_fg, theme.group_border_bg);
    screen.fill(bounds.y, bounds.x, bounds.width, bounds.height, ' ', theme.checkbox_fg, theme.checkbox_bg);
    screen.draw_box(bounds.y, bounds.x, bounds.width, bounds.height, fg, bg);
    if !title.is_empty() && bounds.width > 6 {
        let max = bounds.width as usize - 4;
        let text: String = title.chars().take(max).collect();
        screen.write_str(bounds.y, bounds.x + 2, &format!(" {} ", text), fg, bg);
    }
}

/// Index of the option row under a click
fn row_at(bounds: Rect, row: u16, col: u16, count: usize) -> Option<usize> {
    let inner = bounds.inset(1);
    if !inner.contains(row, col) {
        return None;
    }
    let index = (row - inner.y) as usize;
    (index < count).then_some(index)
}

/// Wide enough for the longest option row and for the framed title
fn cluster_hint<'a>(title: &str, labels: impl Iterator<Item = &'a str>, count: usize) -> SizeHint {
    let widest = labels.map(|label| label.width()).max().unwrap_or(0) as u16;
    let title = title.width() as u16;
    SizeHint {
        min_width: widest.saturating_add(8).max(title.saturating_add(6)),
        min_height: count as u16 + 2,
        flex: 0,
    }
}

/// Moves a cursor over `count` rows; `None` if the key is not navigation
fn step_cursor(event: &InputEvent, cursor: usize, count: usize) -> Option<usize> {
    let last = count.checked_sub(1)?;
    match event {
        InputEvent::CursorUp => Some(cursor.saturating_sub(1)),
        InputEvent::CursorDown => Some((cursor + 1).min(last)),
        InputEvent::Home => Some(0),
        InputEvent::End => Some(last),
        _ => None,
    }
}

/// N independent toggles in a titled frame
#[derive(Clone, Debug)]
pub struct CheckboxGroup {
    title: String,
    boxes: Vec<Checkbox>,
    cursor: usize,
    max_width: Option<u16>,
    focused: bool,
}

impl CheckboxGroup {
    pub fn new(title: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            title: title.into(),
            boxes: options.into_iter().map(Checkbox::new).collect(),
            cursor: 0,
            max_width: None,
            focused: false,
        }
    }

    pub fn with_max_width(mut self, width: u16) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn boxes(&self) -> &[Checkbox] {
        &self.boxes
    }

    pub fn set_checked(&mut self, index: usize, checked: bool) {
        if let Some(b) = self.boxes.get_mut(index) {
            b.set_checked(checked);
        }
    }

    pub fn toggle(&mut self, index: usize) {
        if let Some(b) = self.boxes.get_mut(index) {
            b.toggle();
            self.cursor = index;
        }
    }

    /// Labels of the checked boxes in declaration order
    pub fn checked_labels(&self) -> Vec<&str> {
        self.boxes.iter().filter(|b| b.checked()).map(|b| b.label()).collect()
    }
}

impl TreeWidget for CheckboxGroup {
    fn draw(&self, screen: &mut Screen, bounds: Rect, theme: &Theme) {
        if bounds.width < 5 || bounds.height < 2 {
            return;
        }
        draw_frame(screen, bounds, &self.title, theme);
        let inner = bounds.inset(1);
        for (i, b) in self.boxes.iter().enumerate().take(inner.height as usize) {
            let highlighted = self.focused && i == self.cursor;
            b.draw_row(screen, inner.y + i as u16, inner.x + 1, inner.width.saturating_sub(1), highlighted, theme);
        }
    }

    fn handle_event(&mut self, event: &InputEvent, bounds: Rect) -> EventResult {
        if self.focused && !self.boxes.is_empty() {
            if let Some(cursor) = step_cursor(event, self.cursor, self.boxes.len()) {
                self.cursor = cursor;
                return EventResult::Consumed;
            }
            if matches!(event, InputEvent::Char(' ') | InputEvent::Enter) {
                self.toggle(self.cursor);
                return EventResult::Consumed;
            }
        }

        if let InputEvent::MouseClick { row, col } = *event {
            if bounds.contains(row, col) {
                if let Some(index) = row_at(bounds, row, col, self.boxes.len()) {
                    self.toggle(index);
                }
                return EventResult::Consumed;
            }
        }
        EventResult::Ignored
    }

    fn size_hint(&self) -> SizeHint {
        cluster_hint(&self.title, self.boxes.iter().map(|b| b.label()), self.boxes.len())
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

/// Exactly one selected option in a titled frame
#[derive(Clone, Debug)]
pub struct RadioGroup {
    title: String,
    buttons: Vec<RadioButton>,
    cursor: usize,
    max_width: Option<u16>,
    focused: bool,
}

impl RadioGroup {
    /// The first option starts selected
    pub fn new(title: impl Into<String>, options: Vec<String>) -> Self {
        let mut group = Self {
            title: title.into(),
            buttons: options.into_iter().map(RadioButton::new).collect(),
            cursor: 0,
            max_width: None,
            focused: false,
        };
        group.select(0);
        group
    }

    pub fn with_max_width(mut self, width: u16) -> Self {
        self.max_width = Some(width);
        self
    }

    pub fn select(&mut self, index: usize) {
        if index >= self.buttons.len() {
            return;
        }
        for (i, b) in self.buttons.iter_mut().enumerate() {
            b.set_selected(i == index);
        }
        self.cursor = index;
    }

    pub fn selection(&self) -> Option<usize> {
        self.buttons.iter().position(|b| b.selected())
    }

    pub fn selected_label(&self) -> Option<&str> {
        self.selection().map(|i| self.buttons[i].label())
    }
}

impl TreeWidget for RadioGroup {
    fn draw(&self, screen: &mut Screen, bounds: Rect, theme: &Theme) {
        if bounds.width < 5 || bounds.height < 2 {
            return;
        }
        draw_frame(screen, bounds, &self.title, theme);
        let inner = bounds.inset(1);
        for (i, b) in self.buttons.iter().enumerate().take(inner.height as usize) {
            let highlighted = self.focused && i == self.cursor;
            b.draw_row(screen, inner.y + i as u16, inner.x + 1, inner.width.saturating_sub(1), highlighted, theme);
        }
    }

    fn handle_event(&mut self, event: &InputEvent, bounds: Rect) -> EventResult {
        if self.focused && !self.buttons.is_empty() {
            // Arrow keys move the selection itself, like a native radio box
            if let Some(cursor) = step_cursor(event, self.cursor, self.buttons.len()) {
                self.select(cursor);
                return EventResult::Consumed;
            }
            if matches!(event, InputEvent::Char(' ') | InputEvent::Enter) {
                self.select(self.cursor);
                return EventResult::Consumed;
            }
        }

        if let InputEvent::MouseClick { row, col } = *event {
            if bounds.contains(row, col) {
                if let Some(index) = row_at(bounds, row, col, self.buttons.len()) {
                    self.select(index);
                }
                return EventResult::Consumed;
            }
        }
        EventResult::Ignored
    }

    fn size_hint(&self) -> SizeHint {
        cluster_hint(&self.title, self.buttons.iter().map(|b| b.label()), self.buttons.len())
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

    fn abc() -> Vec<String> {
        vec!["A".into(), "B".into(), "C".into()]
    }

    #[test]
    fn test_checked_labels_keep_declaration_order() {
        let mut group = CheckboxGroup::new("opts", abc());
        group.toggle(2);
        group.toggle(0);
        assert_eq!(group.checked_labels(), vec!["A", "C"]);
    }

    #[test]
    fn test_click_toggles_row() {
        let mut group = CheckboxGroup::new("opts", abc());
        let bounds = Rect::new(1, 1, 20, 5);
        group.handle_event(&InputEvent::MouseClick { row: 3, col: 4 }, bounds);
        assert_eq!(group.checked_labels(), vec!["B"]);
        group.handle_event(&InputEvent::MouseClick { row: 3, col: 4 }, bounds);
        assert!(group.checked_labels().is_empty());
    }

    #[test]
    fn test_radio_defaults_to_first_option() {
        let group = RadioGroup::new("pick", vec!["X".into(), "Y".into()]);
        assert_eq!(group.selected_label(), Some("X"));
        assert_eq!(RadioGroup::new("none", Vec::new()).selected_label(), None);
    }

    #[test]
    fn test_radio_arrow_keys_move_selection() {
        let mut group = RadioGroup::new("pick", abc());
        group.set_focus(true);
        let bounds = Rect::new(1, 1, 20, 5);
        group.handle_event(&InputEvent::CursorDown, bounds);
        group.handle_event(&InputEvent::CursorDown, bounds);
        assert_eq!(group.selected_label(), Some("C"));
        assert_eq!(group.selection(), Some(2));
    }

    #[test]
    fn test_frame_shows_title() {
        let group = RadioGroup::new("pick", vec!["X".into()]);
        let mut screen = Screen::new(20, 3);
        group.draw(&mut screen, Rect::new(1, 1, 20, 3), &Theme::default());
        assert!(screen.row_text(1).contains(" pick "));
        assert!(screen.row_text(2).contains("(•) X"));
    }

    #[test]
    fn test_width_hint_fits_wide_labels_and_title() {
        let group = CheckboxGroup::new("opts", vec!["東京".into(), "B".into()]);
        assert_eq!(group.size_hint().min_width, 12);

        let group = RadioGroup::new("favourite colour", vec!["X".into()]);
        assert_eq!(group.size_hint().min_width, 22);
    }
}
