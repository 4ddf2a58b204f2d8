//! An insertion-only overlay over an immutable source string.

use crate::error::EditError;
use std::collections::BTreeMap;
use std::fmt;

/// Stages insertions against a source text and renders them on demand.
///
/// The original bytes never move. Text prepended to the whole buffer renders
/// before the first character, newest prepend first. Text anchored at an offset
/// renders immediately before the character at that offset, in the order it
/// was added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    original: String,
    intro: String,
    inserts: BTreeMap<usize, String>,
}

impl EditBuffer {
    pub fn new(original: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            intro: String::new(),
            inserts: BTreeMap::new(),
        }
    }

    /// Inserts `text` before everything, including earlier prepends.
    pub fn prepend(&mut self, text: &str) {
        self.intro.insert_str(0, text);
    }

    /// Inserts `text` before the character at `offset`.
    ///
    /// An offset equal to the source length appends to the end.
    pub fn append_left(&mut self, offset: usize, text: &str) -> Result<(), EditError> {
        if offset > self.original.len() {
            return Err(EditError::OutOfBounds { offset, len: self.original.len() });
        }
        if !self.original.is_char_boundary(offset) {
            return Err(EditError::NotCharBoundary { offset });
        }
        if !text.is_empty() {
            self.inserts.entry(offset).or_default().push_str(text);
        }
        Ok(())
    }

    /// Whether rendering would differ from the original text.
    pub fn has_changed(&self) -> bool {
        !self.intro.is_empty() || !self.inserts.is_empty()
    }

    /// Renders the original text with every staged insertion applied.
    pub fn render(&self) -> String {
        let extra = self.intro.len() + self.inserts.values().map(String::len).sum::<usize>();
        let mut out = String::with_capacity(self.original.len() + extra);
        out.push_str(&self.intro);
        let mut cursor = 0;
        for (&offset, text) in &self.inserts {
            out.push_str(&self.original[cursor..offset]);
            out.push_str(text);
            cursor = offset;
        }
        out.push_str(&self.original[cursor..]);
        out
    }
}

impl fmt::Display for EditBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
