//! Single-line text editing for the focused field.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Text of one field plus a cursor counted in grapheme clusters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FieldDraft {
    text: String,
    cursor: usize,
}

impl FieldDraft {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the text and put the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        text.clone_into(&mut self.text);
        self.cursor = self.grapheme_count();
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.grapheme_count());
    }

    pub fn move_cursor_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.grapheme_count();
    }

    pub fn enter_char(&mut self, ch: char) {
        // Newlines have no place in a single-line field.
        if ch == '\n' || ch == '\r' {
            return;
        }
        let index = self.byte_index_at(self.cursor);
        self.text.insert(index, ch);
        self.move_cursor_right();
    }

    pub fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let start = self.byte_index_at(self.cursor - 1);
        let end = self.byte_index_at(self.cursor);
        self.text.replace_range(start..end, "");
        self.move_cursor_left();
    }

    pub fn delete_char_forward(&mut self) {
        if self.cursor >= self.grapheme_count() {
            return;
        }
        let start = self.byte_index_at(self.cursor);
        let end = self.byte_index_at(self.cursor + 1);
        self.text.replace_range(start..end, "");
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    #[must_use]
    pub fn grapheme_count(&self) -> usize {
        self.text.graphemes(true).count()
    }

    /// Display columns taken by the text left of the cursor.
    #[must_use]
    pub fn cursor_column(&self) -> usize {
        self.text[..self.byte_index_at(self.cursor)].width()
    }

    fn byte_index_at(&self, grapheme_index: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .nth(grapheme_index)
            .map_or(self.text.len(), |(i, _)| i)
    }
}
