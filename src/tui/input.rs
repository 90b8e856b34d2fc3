//! Input field handling for the terminal user interface.

/// A single-line text input with a cursor.
///
/// The cursor counts characters, not bytes, so accented input edits cleanly.
#[derive(Clone, Debug, Default)]
pub struct InputField {
    pub value: String,
    pub cursor: usize,
    pub active: bool,
}

impl InputField {
    /// Create a new empty input field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an input field with initial text value, cursor at the end.
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
            active: false,
        }
    }

    fn byte_index(&self, char_pos: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_pos)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    /// Insert a character at the current cursor position.
    pub fn handle_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor.
    pub fn handle_backspace(&mut self) {
        if self.cursor > 0 {
            let at = self.byte_index(self.cursor - 1);
            self.value.remove(at);
            self.cursor -= 1;
        }
    }

    /// Delete the character at the cursor position.
    pub fn handle_delete(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Empty the field and reset the cursor.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Text with a visible cursor marker when the field is active.
    pub fn display(&self) -> String {
        if !self.active {
            return self.value.clone();
        }
        let at = self.byte_index(self.cursor);
        format!("{}|{}", &self.value[..at], &self.value[at..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(s: &str) -> InputField {
        let mut field = InputField::new();
        for c in s.chars() {
            field.handle_char(c);
        }
        field
    }

    #[test]
    fn test_multibyte_editing() {
        let mut field = typed("Descripción");
        assert_eq!(field.cursor, 11);
        field.handle_backspace();
        field.handle_backspace();
        assert_eq!(field.value, "Descripci");
        field.handle_char('ó');
        field.handle_char('n');
        assert_eq!(field.value, "Descripción");
    }

    #[test]
    fn test_cursor_moves_and_delete() {
        let mut field = InputField::with_value("añob");
        field.move_home();
        field.move_cursor_right();
        field.handle_delete();
        assert_eq!(field.value, "aob");
        field.move_cursor_left();
        field.move_cursor_left();
        assert_eq!(field.cursor, 0);
        field.handle_backspace();
        assert_eq!(field.value, "aob");
        field.move_end();
        field.handle_delete();
        assert_eq!(field.value, "aob");
    }

    #[test]
    fn test_display_marks_cursor_only_when_active() {
        let mut field = InputField::with_value("ab");
        assert_eq!(field.display(), "ab");
        field.active = true;
        field.move_cursor_left();
        assert_eq!(field.display(), "a|b");
        field.clear();
        assert_eq!(field.display(), "|");
    }
}
