/// Single-line text buffer for the rename prompt. The cursor is a byte
/// offset that always sits on a char boundary.
#[derive(Debug, Default)]
pub struct EditState {
    pub buffer: String,
    pub cursor: usize,
}

impl EditState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, content: &str) {
        self.buffer = content.to_string();
        self.cursor = self.buffer.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some(start) = self.previous_boundary() {
            self.buffer.remove(start);
            self.cursor = start;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
    }

    pub fn move_cursor_left(&mut self) {
        if let Some(start) = self.previous_boundary() {
            self.cursor = start;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if let Some(c) = self.buffer[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    /// Removes the word before the cursor along with any whitespace between.
    pub fn delete_word_backward(&mut self) {
        let before = &self.buffer[..self.cursor];
        let trimmed = before.trim_end();
        let word_start = trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);

        self.buffer.replace_range(word_start..self.cursor, "");
        self.cursor = word_start;
    }

    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.buffer.split_at(self.cursor)
    }

    fn previous_boundary(&self) -> Option<usize> {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_places_cursor_at_end() {
        let mut edit = EditState::new();
        edit.start("Billing");
        assert_eq!(edit.buffer, "Billing");
        assert_eq!(edit.cursor, 7);
    }

    #[test]
    fn test_insert_and_backspace() {
        let mut edit = EditState::new();
        edit.insert_char('a');
        edit.insert_char('b');
        edit.backspace();
        assert_eq!(edit.buffer, "a");
        assert_eq!(edit.cursor, 1);

        edit.backspace();
        edit.backspace();
        assert_eq!(edit.buffer, "");
        assert_eq!(edit.cursor, 0);
    }

    #[test]
    fn test_multibyte_cursor_movement() {
        let mut edit = EditState::new();
        edit.start("añb");

        edit.move_cursor_left();
        assert_eq!(edit.cursor, 3);
        edit.move_cursor_left();
        assert_eq!(edit.cursor, 1);

        edit.delete();
        assert_eq!(edit.buffer, "ab");

        edit.move_cursor_right();
        assert_eq!(edit.cursor, 2);
        edit.move_cursor_right();
        assert_eq!(edit.cursor, 2);
    }

    #[test]
    fn test_home_end_and_split() {
        let mut edit = EditState::new();
        edit.start("Search");
        edit.move_cursor_home();
        edit.insert_char('>');
        assert_eq!(edit.split_at_cursor(), (">", "Search"));

        edit.move_cursor_end();
        assert_eq!(edit.split_at_cursor(), (">Search", ""));
    }

    #[test]
    fn test_delete_word_backward() {
        let mut edit = EditState::new();
        edit.start("Internal billing  ");
        edit.delete_word_backward();
        assert_eq!(edit.buffer, "Internal ");
        assert_eq!(edit.cursor, 9);

        edit.delete_word_backward();
        assert_eq!(edit.buffer, "");
        assert_eq!(edit.cursor, 0);

        edit.delete_word_backward();
        assert_eq!(edit.buffer, "");
    }

    #[test]
    fn test_clear() {
        let mut edit = EditState::new();
        edit.start("Reports");
        edit.clear();
        assert!(edit.buffer.is_empty());
        assert_eq!(edit.cursor, 0);
    }
}
