//! The text field that currently has focus.
//!
//! Keystrokes go into a local buffer. The page model only sees the text when
//! the field loses focus, so the page sequence isn't rebuilt per keystroke.

use crate::intent::Intent;

/// Uncommitted text for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusedText {
    page_index: usize,
    buffer: String,
    dirty: bool,
}

impl FocusedText {
    /// Focuses the field for a page, starting from its current text.
    pub fn focus(page_index: usize, current: impl Into<String>) -> Self {
        Self {
            page_index,
            buffer: current.into(),
            dirty: false,
        }
    }

    /// Page this field edits.
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    /// Text as typed so far.
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Returns true if the buffer differs from what was focused.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Replaces the buffer. The model is not touched.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        self.dirty = true;
    }

    /// Loses focus, yielding the intent that commits the text.
    ///
    /// An untouched field yields nothing.
    pub fn blur(self) -> Option<Intent> {
        self.dirty.then(|| Intent::CommitPageText {
            page: self.page_index,
            text: self.buffer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blur_commits_last_edit() {
        let mut field = FocusedText::focus(1, "Bake");
        field.edit("Bake at");
        field.edit("Bake at 180°C");
        assert_eq!(field.text(), "Bake at 180°C");

        assert_eq!(
            field.blur(),
            Some(Intent::CommitPageText {
                page: 1,
                text: "Bake at 180°C".to_string()
            })
        );
    }

    #[test]
    fn test_untouched_blur_commits_nothing() {
        let field = FocusedText::focus(0, "Ingredients");
        assert!(!field.is_dirty());
        assert_eq!(field.blur(), None);
    }
}
