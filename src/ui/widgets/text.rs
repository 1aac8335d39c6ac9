//! Text block widget - titles and labels with word wrapping

use crate::input::InputEvent;
use crate::screen::{Cell, Screen};
use crate::ui::layout::{Rect, SizeHint};
use crate::ui::theme::Theme;
use crate::ui::widget::EventResult;
use crate::ui::widget_tree::TreeWidget;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Visual style of a text block
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextStyle {
    /// Bold, centered heading
    Title,
    /// Left-aligned body text
    #[default]
    Body,
}

/// Static, possibly multi-line text
///
/// `wrap` rewrites the displayed text in place by inserting line breaks.
/// Wrapping text that is already wrapped keeps the old breaks, so callers
/// that re-wrap must restore the source string with `set_text` first.
#[derive(Clone, Debug)]
pub struct TextBlock {
    text: String,
    style: TextStyle,
}

impl TextBlock {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self { text: text.into(), style }
    }

    pub fn title(text: impl Into<String>) -> Self {
        Self::new(text, TextStyle::Title)
    }

    pub fn label(text: impl Into<String>) -> Self {
        Self::new(text, TextStyle::Body)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> TextStyle {
        self.style
    }

    /// Replace the displayed text
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Break the displayed text into lines of at most `width` columns
    pub fn wrap(&mut self, width: u16) {
        self.text = wrap_text(&self.text, width.max(1) as usize).join("\n");
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }
}

/// Greedy word wrap; existing line breaks are kept and words wider than
/// `width` are split
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_width = 0usize;

        for word in paragraph.split_whitespace() {
            let word_width = word.width();

            if word_width > width {
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0;
                }
                for ch in word.chars() {
                    let w = ch.width().unwrap_or(0);
                    if line_width + w > width && !line.is_empty() {
                        lines.push(std::mem::take(&mut line));
                        line_width = 0;
                    }
                    line.push(ch);
                    line_width += w;
                }
                continue;
            }

            let needed = if line.is_empty() { word_width } else { line_width + 1 + word_width };
            if needed > width {
                lines.push(std::mem::take(&mut line));
                line.push_str(word);
                line_width = word_width;
            } else {
                if !line.is_empty() {
                    line.push(' ');
                }
                line.push_str(word);
                line_width = needed;
            }
        }

        lines.push(line);
    }

    lines
}

impl TreeWidget for TextBlock {
    fn draw(&self, screen: &mut Screen, bounds: Rect, theme: &Theme) {
        let (fg, bg) = match self.style {
            TextStyle::Title => (theme.title_fg, theme.title_bg),
            TextStyle::Body => (theme.label_fg, theme.label_bg),
        };
        let bold = self.style == TextStyle::Title;

        for (i, line) in self.lines().enumerate().take(bounds.height as usize) {
            let row = bounds.y + i as u16;
            let line_width = line.width() as u16;
            let mut col = match self.style {
                TextStyle::Title => bounds.x + bounds.width.saturating_sub(line_width) / 2,
                TextStyle::Body => bounds.x,
            };
            for ch in line.chars() {
                let w = ch.width().unwrap_or(0) as u16;
                if w == 0 {
                    continue;
                }
                if col + w > bounds.x + bounds.width {
                    break;
                }
                let mut cell = Cell::new(ch, fg, bg);
                cell.bold = bold;
                screen.set_cell(row, col, cell);
                col += w;
            }
        }
    }

    fn handle_event(&mut self, _event: &InputEvent, _bounds: Rect) -> EventResult {
        EventResult::Ignored
    }

    fn size_hint(&self) -> SizeHint {
        let widest = self.lines().map(|l| l.width()).max().unwrap_or(0) as u16;
        SizeHint {
            min_width: widest,
            min_height: self.lines().count().max(1) as u16,
            flex: 0,
        }
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

    #[test]
    fn test_wrap_breaks_at_word_boundaries() {
        let lines = wrap_text("the quick brown fox jumps", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn test_wrap_splits_overlong_words() {
        let lines = wrap_text("abcdefghij xy", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij", "xy"]);
    }

    #[test]
    fn test_wrapping_wrapped_text_keeps_old_breaks() {
        let mut block = TextBlock::label("one two three four");
        block.wrap(8);
        assert_eq!(block.text(), "one two\nthree\nfour");
        block.wrap(80);
        assert_eq!(block.text(), "one two\nthree\nfour");
    }

    #[test]
    fn test_title_is_centered_and_bold() {
        let block = TextBlock::title("Hi");
        let mut screen = Screen::new(10, 1);
        block.draw(&mut screen, Rect::new(1, 1, 10, 1), &Theme::default());
        assert_eq!(screen.row_text(1), "    Hi");
        assert!(screen.get(1, 5).is_some_and(|c| c.bold));
    }
}
