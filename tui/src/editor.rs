//! Focus and draft state for the page on screen.

use stepwise_types::{FieldName, FormFields, Position};

use crate::draft::FieldDraft;
use crate::pages::FormPage;

/// Tracks which page the editor is showing, which of its fields has focus and
/// the text being typed into it.
#[derive(Debug, Default)]
pub struct FieldEditor {
    page: Option<Position>,
    fields: &'static [FieldName],
    focus: usize,
    draft: FieldDraft,
}

impl FieldEditor {
    /// Point the editor at the page at `position`. Switching pages resets the
    /// focus to the first field; staying on the same page keeps it.
    pub fn sync(&mut self, position: Position, page: &FormPage, values: &FormFields) {
        if self.page == Some(position) {
            return;
        }
        self.page = Some(position);
        self.fields = page.fields;
        self.focus = 0;
        self.load(values);
    }

    /// Position of the page last synced, if any.
    #[must_use]
    pub fn page(&self) -> Option<Position> {
        self.page
    }

    #[must_use]
    pub fn focused(&self) -> Option<FieldName> {
        self.fields.get(self.focus).copied()
    }

    #[must_use]
    pub fn draft(&self) -> &FieldDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut FieldDraft {
        &mut self.draft
    }

    pub fn focus_next(&mut self, values: &FormFields) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = (self.focus + 1) % self.fields.len();
        self.load(values);
    }

    pub fn focus_prev(&mut self, values: &FormFields) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = self
            .focus
            .checked_sub(1)
            .unwrap_or(self.fields.len() - 1);
        self.load(values);
    }

    /// Move focus to `field` if it is on the current page.
    pub fn focus_field(&mut self, field: FieldName, values: &FormFields) -> bool {
        let Some(index) = self.fields.iter().position(|f| *f == field) else {
            return false;
        };
        self.focus = index;
        self.load(values);
        true
    }

    /// Reload the draft from the stored value of the focused field.
    pub fn load(&mut self, values: &FormFields) {
        match self.focused() {
            Some(field) => self.draft.set_text(values.get(field)),
            None => self.draft.clear(),
        }
    }

    /// Forget the synced page so the next [`sync`](Self::sync) starts fresh.
    pub fn invalidate(&mut self) {
        self.page = None;
    }
}
