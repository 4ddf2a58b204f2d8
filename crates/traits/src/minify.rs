use fontless_types::MinifyConfig;
use std::fmt::Debug;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum MinifyError {
    #[error("Failed to parse generated CSS: {0}")]
    Parse(String),

    #[error("Failed to minify CSS: {0}")]
    Minify(String),

    #[error("Failed to print CSS: {0}")]
    Print(String),
}

/// Text-in, text-out minifier for generated `@font-face` rules.
///
/// Callers treat a failure as recoverable and keep the unminified text.
pub trait CssMinifier: Send + Sync + Debug {
    fn minify(&self, css: &str, config: &MinifyConfig) -> Result<String, MinifyError>;

    /// Returns a human-readable name for this minifier (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// Returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughMinifier;

impl CssMinifier for PassthroughMinifier {
    fn minify(&self, css: &str, _config: &MinifyConfig) -> Result<String, MinifyError> {
        Ok(css.to_string())
    }

    fn name(&self) -> &'static str {
        "PassthroughMinifier"
    }
}
