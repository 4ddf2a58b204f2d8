use thiserror::Error;

/// Errors that can occur while parsing a stylesheet.
///
/// Offsets are byte positions into the text that was handed to the parser.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CssParseError {
    #[error("Unterminated string starting at byte {offset}")]
    UnterminatedString { offset: usize },

    #[error("Unterminated comment starting at byte {offset}")]
    UnterminatedComment { offset: usize },

    #[error("Unterminated block starting at byte {offset}")]
    UnterminatedBlock { offset: usize },

    #[error("Unexpected '}}' at byte {offset}")]
    UnexpectedCloseBrace { offset: usize },

    #[error("Invalid declaration at byte {offset}: {message}")]
    InvalidDeclaration { offset: usize, message: String },

    #[error("Parse error at byte {offset}: {message}")]
    Syntax { offset: usize, message: String },
}

impl CssParseError {
    pub fn offset(&self) -> usize {
        match self {
            CssParseError::UnterminatedString { offset }
            | CssParseError::UnterminatedComment { offset }
            | CssParseError::UnterminatedBlock { offset }
            | CssParseError::UnexpectedCloseBrace { offset }
            | CssParseError::InvalidDeclaration { offset, .. }
            | CssParseError::Syntax { offset, .. } => *offset,
        }
    }
}
