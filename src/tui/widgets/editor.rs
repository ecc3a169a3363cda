use std::cmp;
use unicode_width::UnicodeWidthStr;

/// Multi-line text buffer behind the note field.
/// Cursor columns count chars, not bytes.
#[derive(Debug, Clone)]
pub struct Editor {
    pub lines: Vec<String>,
    pub cursor_line: usize,
    pub cursor_col: usize,
    pub scroll_offset: usize, // First visible line
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor_line: 0,
            cursor_col: 0,
            scroll_offset: 0,
        }
    }

    /// Full buffer contents, lines joined with '\n'
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// True when the buffer holds nothing but whitespace
    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|l| l.trim().is_empty())
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    fn ensure_cursor_valid(&mut self) {
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        if self.cursor_line >= self.lines.len() {
            self.cursor_line = self.lines.len() - 1;
        }
        let len = self.current_line_len();
        self.cursor_col = cmp::min(self.cursor_col, len);
    }

    fn current_line_len(&self) -> usize {
        self.lines
            .get(self.cursor_line)
            .map(|l| l.chars().count())
            .unwrap_or(0)
    }

    /// Byte offset of the cursor within the current line
    fn cursor_byte_index(&self) -> usize {
        let line = &self.lines[self.cursor_line];
        line.char_indices()
            .nth(self.cursor_col)
            .map(|(i, _)| i)
            .unwrap_or(line.len())
    }

    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' {
            self.insert_newline();
            return;
        }
        self.ensure_cursor_valid();
        let idx = self.cursor_byte_index();
        self.lines[self.cursor_line].insert(idx, ch);
        self.cursor_col += 1;
    }

    pub fn insert_newline(&mut self) {
        self.ensure_cursor_valid();
        let idx = self.cursor_byte_index();
        let rest = self.lines[self.cursor_line].split_off(idx);
        self.lines.insert(self.cursor_line + 1, rest);
        self.cursor_line += 1;
        self.cursor_col = 0;
    }

    /// Backspace: remove the char before the cursor, joining lines at column 0
    pub fn delete_char(&mut self) {
        self.ensure_cursor_valid();
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
            let idx = self.cursor_byte_index();
            self.lines[self.cursor_line].remove(idx);
        } else if self.cursor_line > 0 {
            let current = self.lines.remove(self.cursor_line);
            self.cursor_line -= 1;
            self.cursor_col = self.current_line_len();
            self.lines[self.cursor_line].push_str(&current);
        }
    }

    /// Delete: remove the char under the cursor, joining the next line at line end
    pub fn delete_forward(&mut self) {
        self.ensure_cursor_valid();
        if self.cursor_col < self.current_line_len() {
            let idx = self.cursor_byte_index();
            self.lines[self.cursor_line].remove(idx);
        } else if self.cursor_line + 1 < self.lines.len() {
            let next = self.lines.remove(self.cursor_line + 1);
            self.lines[self.cursor_line].push_str(&next);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.ensure_cursor_valid();
        if self.cursor_col > 0 {
            self.cursor_col -= 1;
        } else if self.cursor_line > 0 {
            self.cursor_line -= 1;
            self.cursor_col = self.current_line_len();
        }
    }

    pub fn move_cursor_right(&mut self) {
        self.ensure_cursor_valid();
        if self.cursor_col < self.current_line_len() {
            self.cursor_col += 1;
        } else if self.cursor_line + 1 < self.lines.len() {
            self.cursor_line += 1;
            self.cursor_col = 0;
        }
    }

    pub fn move_cursor_up(&mut self) {
        if self.cursor_line > 0 {
            self.cursor_line -= 1;
        }
        self.ensure_cursor_valid();
    }

    pub fn move_cursor_down(&mut self) {
        if self.cursor_line + 1 < self.lines.len() {
            self.cursor_line += 1;
        }
        self.ensure_cursor_valid();
    }

    pub fn move_to_line_start(&mut self) {
        self.cursor_col = 0;
    }

    pub fn move_to_line_end(&mut self) {
        self.ensure_cursor_valid();
        self.cursor_col = self.current_line_len();
    }

    /// Keep the cursor line inside a viewport of `viewport_height` lines
    pub fn update_scroll(&mut self, viewport_height: usize) {
        let height = cmp::max(viewport_height, 1);
        if self.cursor_line < self.scroll_offset {
            self.scroll_offset = self.cursor_line;
        } else if self.cursor_line >= self.scroll_offset + height {
            self.scroll_offset = self.cursor_line + 1 - height;
        }
    }

    /// Terminal columns occupied by the text before the cursor
    pub fn cursor_display_col(&self) -> usize {
        let Some(line) = self.lines.get(self.cursor_line) else {
            return 0;
        };
        let prefix: String = line.chars().take(self.cursor_col).collect();
        prefix.width()
    }
}
