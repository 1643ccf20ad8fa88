use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Single-line text input buffer with grapheme-aware cursor management
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputBuffer {
    /// The actual text content
    content: String,
    /// Cursor position as byte index in the content string
    cursor_position: usize,
}

impl InputBuffer {
    /// Create a new empty input buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer pre-filled with `value`, cursor at the end
    pub fn with_value(value: impl Into<String>) -> Self {
        let mut buffer = Self::new();
        buffer.set(value);
        buffer
    }

    /// Get the current text content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the current cursor position (byte index)
    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Length in graphemes (not bytes)
    pub fn len(&self) -> usize {
        self.content.graphemes(true).count()
    }

    /// Clear all content and reset cursor
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor_position = 0;
    }

    /// Replace the content and move the cursor to the end
    pub fn set(&mut self, value: impl Into<String>) {
        self.content = value.into();
        self.cursor_position = self.content.len();
    }

    /// Take the content out, leaving the buffer empty
    pub fn take(&mut self) -> String {
        self.cursor_position = 0;
        std::mem::take(&mut self.content)
    }

    /// Insert a character at the current cursor position
    pub fn insert_char(&mut self, ch: char) {
        self.content.insert(self.cursor_position, ch);
        self.cursor_position += ch.len_utf8();
    }

    /// Insert a string at the current cursor position
    pub fn insert_str(&mut self, s: &str) {
        self.content.insert_str(self.cursor_position, s);
        self.cursor_position += s.len();
    }

    /// Delete the grapheme at the cursor position (Delete key behavior)
    pub fn delete_char(&mut self) -> bool {
        if self.cursor_position >= self.content.len() {
            return false;
        }

        let next = self
            .content
            .grapheme_indices(true)
            .find(|(idx, _)| *idx >= self.cursor_position);

        match next {
            Some((start, grapheme)) => {
                self.content.drain(start..start + grapheme.len());
                true
            }
            None => false,
        }
    }

    /// Delete the grapheme before the cursor position (Backspace key behavior)
    pub fn backspace(&mut self) -> bool {
        if self.cursor_position == 0 {
            return false;
        }

        let previous = self
            .content
            .grapheme_indices(true)
            .take_while(|(idx, _)| *idx < self.cursor_position)
            .last();

        match previous {
            Some((start, grapheme)) => {
                self.content.drain(start..start + grapheme.len());
                self.cursor_position = start;
                true
            }
            None => false,
        }
    }

    /// Move cursor left by one grapheme
    pub fn move_left(&mut self) -> bool {
        if self.cursor_position == 0 {
            return false;
        }

        self.cursor_position = self
            .content
            .grapheme_indices(true)
            .map(|(pos, _)| pos)
            .take_while(|pos| *pos < self.cursor_position)
            .last()
            .unwrap_or(0);
        true
    }

    /// Move cursor right by one grapheme
    pub fn move_right(&mut self) -> bool {
        if self.cursor_position >= self.content.len() {
            return false;
        }

        for (pos, grapheme) in self.content.grapheme_indices(true) {
            if pos >= self.cursor_position {
                self.cursor_position = pos + grapheme.len();
                return true;
            }
        }

        false
    }

    pub fn move_to_start(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_to_end(&mut self) {
        self.cursor_position = self.content.len();
    }

    /// Move cursor to the beginning of the previous word
    pub fn move_word_left(&mut self) -> bool {
        if self.cursor_position == 0 {
            return false;
        }

        let before: Vec<(usize, char)> = self.content[..self.cursor_position]
            .char_indices()
            .collect();
        let mut pos = before.len();

        // Skip trailing whitespace
        while pos > 0 && before[pos - 1].1.is_whitespace() {
            pos -= 1;
        }
        // Skip the current word
        while pos > 0 && !before[pos - 1].1.is_whitespace() {
            pos -= 1;
        }

        self.cursor_position = before.get(pos).map(|(idx, _)| *idx).unwrap_or(0);
        true
    }

    /// Move cursor past the end of the next word
    pub fn move_word_right(&mut self) -> bool {
        if self.cursor_position >= self.content.len() {
            return false;
        }

        let rest = &self.content[self.cursor_position..];
        let mut chars = rest.char_indices().peekable();

        while let Some((_, ch)) = chars.peek() {
            if !ch.is_whitespace() {
                break;
            }
            chars.next();
        }
        while let Some((_, ch)) = chars.peek() {
            if ch.is_whitespace() {
                break;
            }
            chars.next();
        }

        let offset = chars.peek().map(|(idx, _)| *idx).unwrap_or(rest.len());
        self.cursor_position += offset;
        true
    }

    /// Cursor position as a display column (accounts for wide characters)
    pub fn cursor_display_column(&self) -> u16 {
        self.content[..self.cursor_position].width() as u16
    }

    /// Apply an editing key. Returns false when the key is not an edit.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('u') if ctrl => {
                self.clear();
                true
            }
            KeyCode::Char(c) if !ctrl => {
                self.insert_char(c);
                true
            }
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete_char(),
            KeyCode::Left if ctrl => self.move_word_left(),
            KeyCode::Right if ctrl => self.move_word_right(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => {
                self.move_to_start();
                true
            }
            KeyCode::End => {
                self.move_to_end();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer() {
        let buffer = InputBuffer::new();
        assert!(buffer.is_empty());
        assert_eq!(buffer.len(), 0);
        assert_eq!(buffer.cursor_position(), 0);
    }

    #[test]
    fn test_insert_char() {
        let mut buffer = InputBuffer::new();
        buffer.insert_char('H');
        buffer.insert_char('i');

        assert_eq!(buffer.content(), "Hi");
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.cursor_position(), 2);
    }

    #[test]
    fn test_backspace() {
        let mut buffer = InputBuffer::with_value("Hello");

        assert!(buffer.backspace());
        assert_eq!(buffer.content(), "Hell");
        assert_eq!(buffer.cursor_position(), 4);

        // Test at beginning
        buffer.move_to_start();
        assert!(!buffer.backspace());
    }

    #[test]
    fn test_cursor_movement() {
        let mut buffer = InputBuffer::with_value("Hello");

        assert!(buffer.move_left());
        assert_eq!(buffer.cursor_position(), 4);

        buffer.move_to_start();
        assert_eq!(buffer.cursor_position(), 0);
        assert!(!buffer.move_left());

        buffer.move_to_end();
        assert_eq!(buffer.cursor_position(), 5);
        assert!(!buffer.move_right());
    }

    #[test]
    fn test_graphemes_are_edited_whole() {
        let mut buffer = InputBuffer::with_value("née🦀");
        assert_eq!(buffer.len(), 4);

        assert!(buffer.backspace());
        assert_eq!(buffer.content(), "née");

        buffer.move_to_start();
        assert!(buffer.move_right());
        assert!(buffer.delete_char());
        assert_eq!(buffer.content(), "ne");
    }

    #[test]
    fn test_word_movement() {
        let mut buffer = InputBuffer::with_value("work, home go");

        assert!(buffer.move_word_left());
        assert_eq!(buffer.cursor_position(), 11);
        assert!(buffer.move_word_left());
        assert_eq!(buffer.cursor_position(), 6);

        assert!(buffer.move_word_right());
        assert_eq!(buffer.cursor_position(), 10);
    }

    #[test]
    fn test_take_empties_buffer() {
        let mut buffer = InputBuffer::with_value("tags");
        assert_eq!(buffer.take(), "tags");
        assert!(buffer.is_empty());
        assert_eq!(buffer.cursor_position(), 0);
    }

    #[test]
    fn test_handle_key_edits() {
        let mut buffer = InputBuffer::new();
        assert!(buffer.handle_key(&KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE)));
        assert!(buffer.handle_key(&KeyEvent::new(KeyCode::Char('B'), KeyModifiers::SHIFT)));
        assert_eq!(buffer.content(), "aB");

        assert!(!buffer.handle_key(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));

        assert!(buffer.handle_key(&KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL)));
        assert!(buffer.is_empty());
    }
}
