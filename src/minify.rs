//! lightningcss-backed minifier for generated `@font-face` rules.

use fontless_traits::{CssMinifier, MinifyError};
use fontless_types::{Charset, MinifyConfig};
use lightningcss::printer::PrinterOptions;
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, StyleSheet};
use lightningcss::targets::{Browsers, Targets};
use log::warn;

/// Minifies CSS with lightningcss.
///
/// `minify_syntax` runs lightningcss's rule minifier for the configured
/// browser targets, `minify_whitespace` prints without whitespace. Generated
/// `@font-face` rules define no identifiers that could be renamed, so
/// `minify_identifiers` has nothing to act on.
#[derive(Debug, Clone, Copy, Default)]
pub struct LightningCssMinifier;

impl LightningCssMinifier {
    pub fn new() -> Self {
        Self
    }

    fn targets(config: &MinifyConfig) -> Targets {
        if config.targets.is_empty() {
            return Targets::default();
        }
        match Browsers::from_browserslist(config.targets.iter()) {
            Ok(Some(browsers)) => Targets::from(browsers),
            Ok(None) => Targets::default(),
            Err(e) => {
                warn!("Ignoring browser targets {:?}: {}", config.targets, e);
                Targets::default()
            }
        }
    }
}

impl CssMinifier for LightningCssMinifier {
    fn minify(&self, css: &str, config: &MinifyConfig) -> Result<String, MinifyError> {
        let targets = Self::targets(config);
        let mut stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| MinifyError::Parse(e.to_string()))?;

        if config.minify_syntax {
            stylesheet
                .minify(MinifyOptions {
                    targets,
                    ..Default::default()
                })
                .map_err(|e| MinifyError::Minify(e.to_string()))?;
        }

        let output = stylesheet
            .to_css(PrinterOptions {
                minify: config.minify_whitespace,
                targets,
                ..Default::default()
            })
            .map_err(|e| MinifyError::Print(e.to_string()))?;

        Ok(match config.charset {
            Charset::Utf8 => output.code,
            Charset::Ascii => escape_non_ascii(&output.code),
        })
    }

    fn name(&self) -> &'static str {
        "LightningCssMinifier"
    }
}

/// Replaces every non-ASCII character with a CSS hex escape.
fn escape_non_ascii(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    for c in css.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            out.push_str(&format!("\\{:x} ", c as u32));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const FACE: &str = "@font-face {\n  font-family: \"Foo\";\n  src: url(\"/_fonts/foo.woff2\") format(\"woff2\");\n  font-display: swap;\n}";

    #[test]
    fn test_minify_removes_whitespace() {
        let minified = LightningCssMinifier::new().minify(FACE, &MinifyConfig::default()).unwrap();
        assert!(minified.starts_with("@font-face{"));
        assert!(!minified.contains('\n'));
        assert!(minified.contains("/_fonts/foo.woff2"));
        assert!(minified.contains("swap"));
    }

    #[test]
    fn test_whitespace_can_be_kept() {
        let config = MinifyConfig { minify_whitespace: false, ..Default::default() };
        let printed = LightningCssMinifier::new().minify(FACE, &config).unwrap();
        assert!(printed.contains('\n'));
    }

    #[test]
    fn test_ascii_charset_escapes() {
        assert_eq!(escape_non_ascii("a{content:\"é\"}"), "a{content:\"\\e9 \"}");
        let config = MinifyConfig { charset: Charset::Ascii, ..Default::default() };
        let css = "@font-face {\n  font-family: \"Fönt\";\n  src: local(\"Fönt\");\n}";
        let minified = LightningCssMinifier::new().minify(css, &config).unwrap();
        assert!(minified.is_ascii());
    }

    #[test]
    fn test_browser_targets() {
        let config = MinifyConfig::default().with_targets(["chrome 100"]);
        let minified = LightningCssMinifier::new().minify(FACE, &config).unwrap();
        assert!(minified.starts_with("@font-face{"));

        let config = MinifyConfig::default().with_targets(["not a real query"]);
        assert!(LightningCssMinifier::new().minify(FACE, &config).is_ok());
    }
}
