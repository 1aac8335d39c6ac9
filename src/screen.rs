//! Double-buffered screen rendering system
//! Minimizes flicker by only updating changed cells

use crate::terminal::{Color, Terminal};
use std::io;

/// A single cell on the screen
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::LightGray,
            bg: Color::Black,
            bold: false,
        }
    }
}

impl Cell {
    pub fn new(ch: char, fg: Color, bg: Color) -> Self {
        Self { ch, fg, bg, bold: false }
    }
}

/// Clip region in 1-based screen coordinates
#[derive(Clone, Copy, Debug)]
struct Clip {
    row: u16,
    col: u16,
    width: u16,
    height: u16,
}

impl Clip {
    fn contains(&self, row: u16, col: u16) -> bool {
        row >= self.row
            && (row as u32) < self.row as u32 + self.height as u32
            && col >= self.col
            && (col as u32) < self.col as u32 + self.width as u32
    }

    fn intersect(&self, other: &Clip) -> Clip {
        let row = self.row.max(other.row);
        let col = self.col.max(other.col);
        let bottom = (self.row as u32 + self.height as u32).min(other.row as u32 + other.height as u32);
        let right = (self.col as u32 + self.width as u32).min(other.col as u32 + other.width as u32);
        Clip {
            row,
            col,
            width: right.saturating_sub(col as u32) as u16,
            height: bottom.saturating_sub(row as u32) as u16,
        }
    }
}

/// Double-buffered screen
///
/// Also used as an off-screen canvas: the form content is drawn into a
/// buffer as tall as the content and blitted through the scroll viewport.
pub struct Screen {
    width: u16,
    height: u16,
    front: Vec<Cell>, // Currently displayed
    back: Vec<Cell>,  // Being drawn to
    clip_stack: Vec<Clip>,
}

impl Screen {
    /// Create a new screen with given dimensions
    pub fn new(width: u16, height: u16) -> Self {
        let size = (width as usize) * (height as usize);

        Self {
            width,
            height,
            front: vec![Cell::new('\0', Color::Black, Color::Black); size], // Force initial draw
            back: vec![Cell::default(); size],
            clip_stack: Vec::new(),
        }
    }

    /// Get screen dimensions
    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Resize the screen
    pub fn resize(&mut self, width: u16, height: u16) {
        let size = (width as usize) * (height as usize);

        self.width = width;
        self.height = height;
        self.front = vec![Cell::new('\0', Color::Black, Color::Black); size];
        self.back = vec![Cell::default(); size];
        self.clip_stack.clear();
    }

    /// Convert row/col to buffer index (1-based coordinates)
    fn index(&self, row: u16, col: u16) -> Option<usize> {
        if row >= 1 && row <= self.height && col >= 1 && col <= self.width {
            Some(((row - 1) as usize) * (self.width as usize) + ((col - 1) as usize))
        } else {
            None
        }
    }

    fn clipped(&self, row: u16, col: u16) -> bool {
        self.clip_stack.last().is_some_and(|clip| !clip.contains(row, col))
    }

    /// Restrict drawing to a rectangle until the matching `pop_clip`
    pub fn push_clip(&mut self, row: u16, col: u16, width: u16, height: u16) {
        let clip = Clip { row, col, width, height };
        let clip = match self.clip_stack.last() {
            Some(outer) => outer.intersect(&clip),
            None => clip,
        };
        self.clip_stack.push(clip);
    }

    pub fn pop_clip(&mut self) {
        self.clip_stack.pop();
    }

    /// Set a cell in the back buffer
    pub fn set(&mut self, row: u16, col: u16, ch: char, fg: Color, bg: Color) {
        self.set_cell(row, col, Cell::new(ch, fg, bg));
    }

    /// Set a cell including text attributes
    pub fn set_cell(&mut self, row: u16, col: u16, cell: Cell) {
        if self.clipped(row, col) {
            return;
        }
        if let Some(idx) = self.index(row, col) {
            self.back[idx] = cell;
        }
    }

    /// Get a cell from the back buffer
    pub fn get(&self, row: u16, col: u16) -> Option<Cell> {
        self.index(row, col).map(|idx| self.back[idx])
    }

    /// Write a string to the back buffer starting at given position
    pub fn write_str(&mut self, row: u16, col: u16, s: &str, fg: Color, bg: Color) {
        let mut c = col;
        for ch in s.chars() {
            if c > self.width {
                break;
            }
            self.set(row, c, ch, fg, bg);
            c += 1;
        }
    }

    /// Fill a rectangle with a character
    #[allow(clippy::too_many_arguments)]
    pub fn fill(&mut self, row: u16, col: u16, width: u16, height: u16, ch: char, fg: Color, bg: Color) {
        for r in row..row.saturating_add(height) {
            for c in col..col.saturating_add(width) {
                self.set(r, c, ch, fg, bg);
            }
        }
    }

    /// Clear with specific colors
    pub fn clear_with(&mut self, fg: Color, bg: Color) {
        self.back.fill(Cell::new(' ', fg, bg));
    }

    /// Draw a single-line box
    pub fn draw_box(&mut self, row: u16, col: u16, width: u16, height: u16, fg: Color, bg: Color) {
        if width < 2 || height < 2 {
            return;
        }

        self.set(row, col, '┌', fg, bg);
        self.set(row, col + width - 1, '┐', fg, bg);
        self.set(row + height - 1, col, '└', fg, bg);
        self.set(row + height - 1, col + width - 1, '┘', fg, bg);

        for c in 1..width - 1 {
            self.set(row, col + c, '─', fg, bg);
            self.set(row + height - 1, col + c, '─', fg, bg);
        }

        for r in 1..height - 1 {
            self.set(row + r, col, '│', fg, bg);
            self.set(row + r, col + width - 1, '│', fg, bg);
        }
    }

    /// Draw a double-line box (for the form frame)
    pub fn draw_double_box(&mut self, row: u16, col: u16, width: u16, height: u16, fg: Color, bg: Color) {
        if width < 2 || height < 2 {
            return;
        }

        self.set(row, col, '╔', fg, bg);
        self.set(row, col + width - 1, '╗', fg, bg);
        self.set(row + height - 1, col, '╚', fg, bg);
        self.set(row + height - 1, col + width - 1, '╝', fg, bg);

        for c in 1..width - 1 {
            self.set(row, col + c, '═', fg, bg);
            self.set(row + height - 1, col + c, '═', fg, bg);
        }

        for r in 1..height - 1 {
            self.set(row + r, col, '║', fg, bg);
            self.set(row + r, col + width - 1, '║', fg, bg);
        }
    }

    /// Copy `height` rows of `src`, starting at `src_row`, to `(dest_row, dest_col)`
    pub fn blit(&mut self, src: &Screen, src_row: u16, dest_row: u16, dest_col: u16, height: u16) {
        let (src_width, _) = src.size();
        for r in 0..height {
            for c in 0..src_width {
                if let Some(cell) = src.get(src_row + r, c + 1) {
                    self.set_cell(dest_row + r, dest_col + c, cell);
                }
            }
        }
    }

    /// Text content of one row, trailing blanks trimmed
    pub fn row_text(&self, row: u16) -> String {
        let text: String = (1..=self.width)
            .filter_map(|col| self.get(row, col))
            .map(|cell| cell.ch)
            .collect();
        text.trim_end().to_string()
    }

    /// Flush changes to the terminal (only updates changed cells)
    pub fn flush(&mut self, term: &mut Terminal) -> io::Result<()> {
        let mut last_fg = Color::Black;
        let mut last_bg = Color::Black;
        let mut last_bold = false;
        let mut last_row: u16 = 0;
        let mut last_col: u16 = 0;
        let mut need_move = true;

        term.reset_colors()?;
        term.set_colors(last_fg, last_bg)?;

        for row in 1..=self.height {
            for col in 1..=self.width {
                let Some(idx) = self.index(row, col) else {
                    continue;
                };
                let back = self.back[idx];
                if self.front[idx] == back {
                    continue;
                }

                if need_move || row != last_row || col != last_col + 1 {
                    term.goto(row, col)?;
                }

                if back.bold != last_bold {
                    term.set_bold(back.bold)?;
                    last_bold = back.bold;
                }

                if back.fg != last_fg || back.bg != last_bg {
                    term.set_colors(back.fg, back.bg)?;
                    last_fg = back.fg;
                    last_bg = back.bg;
                }

                term.write_char(back.ch)?;
                self.front[idx] = back;

                last_row = row;
                last_col = col;
                need_move = false;
            }
        }

        term.hide_cursor()?;
        term.flush()
    }

    /// Force full redraw on next flush
    pub fn invalidate(&mut self) {
        for cell in &mut self.front {
            cell.ch = '\0';
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_blocks_writes_outside_region() {
        let mut screen = Screen::new(10, 3);
        screen.push_clip(1, 1, 3, 1);
        screen.write_str(1, 1, "abcdef", Color::Black, Color::White);
        screen.pop_clip();
        assert_eq!(screen.row_text(1), "abc");
    }

    #[test]
    fn test_nested_clips_intersect() {
        let mut screen = Screen::new(10, 3);
        screen.push_clip(1, 1, 6, 1);
        screen.push_clip(1, 4, 6, 1);
        screen.write_str(1, 1, "abcdefghij", Color::Black, Color::White);
        screen.pop_clip();
        screen.pop_clip();
        assert_eq!(screen.row_text(1), "   def");
    }

    #[test]
    fn test_blit_copies_scrolled_rows() {
        let mut canvas = Screen::new(4, 5);
        for row in 1..=5u16 {
            canvas.write_str(row, 1, &format!("r{}", row), Color::Black, Color::White);
        }

        let mut screen = Screen::new(6, 2);
        screen.blit(&canvas, 3, 1, 2, 2);
        assert_eq!(screen.row_text(1), " r3");
        assert_eq!(screen.row_text(2), " r4");
    }
}
