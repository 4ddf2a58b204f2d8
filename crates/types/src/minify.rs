use serde::{Deserialize, Serialize};

/// Output character set for minified CSS.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Charset {
    #[default]
    Utf8,
    /// Escape every non-ASCII character.
    Ascii,
}

/// Options for minifying generated `@font-face` text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MinifyConfig {
    pub charset: Charset,
    /// Browserslist queries describing the target environment.
    pub targets: Vec<String>,
    pub minify_identifiers: bool,
    pub minify_syntax: bool,
    pub minify_whitespace: bool,
}

impl Default for MinifyConfig {
    fn default() -> Self {
        Self {
            charset: Charset::Utf8,
            targets: Vec::new(),
            minify_identifiers: true,
            minify_syntax: true,
            minify_whitespace: true,
        }
    }
}

impl MinifyConfig {
    pub fn with_targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.targets = targets.into_iter().map(Into::into).collect();
        self
    }
}
