use thiserror::Error;

/// Errors raised while staging edits against a stylesheet.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Insertion offset {offset} is past the end of the source ({len} bytes)")]
    OutOfBounds { offset: usize, len: usize },

    #[error("Insertion offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: usize },
}
