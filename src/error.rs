//! Defines the error type for rewrite operations and host hooks.

use fontless_core::EditError;
use fontless_css::CssParseError;
use fontless_traits::ResolveError;
use thiserror::Error;

/// The main error enum for all high-level operations.
///
/// A failed minification is never reported here; the generated text is kept
/// unminified instead.
#[derive(Error, Debug)]
pub enum RewriteError {
    #[error("CSS parse error: {0}")]
    Parse(#[from] CssParseError),
    #[error("Font resolution error: {0}")]
    Resolve(#[from] ResolveError),
    #[error("Edit error: {0}")]
    Edit(#[from] EditError),
    #[error("No tokio runtime to resolve fonts on: {0}")]
    Runtime(String),
    #[error("Font resolution task failed: {0}")]
    Task(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<tokio::task::JoinError> for RewriteError {
    fn from(e: tokio::task::JoinError) -> Self {
        RewriteError::Task(e.to_string())
    }
}
