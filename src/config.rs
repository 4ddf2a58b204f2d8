//! Plugin configuration, loadable from JSON.

use crate::error::RewriteError;
use fontless_traits::InMemoryFontResolver;
use fontless_types::{GenericFamily, MinifyConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

/// Settings shared by every rewrite in a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FontlessConfig {
    /// Development mode: generated rules are left readable and never minified.
    pub dev: bool,
    /// Also treat custom properties (`--*`) as font family candidates.
    pub process_css_variables: bool,
    pub minify: MinifyConfig,
    /// Local fonts used for metric-matched fallbacks, keyed by generic family keyword.
    pub fallbacks: HashMap<String, Vec<String>>,
}

impl Default for FontlessConfig {
    fn default() -> Self {
        let fallbacks = GenericFamily::ALL
            .into_iter()
            .filter(|generic| !generic.default_fallbacks().is_empty())
            .map(|generic| {
                let fonts = generic.default_fallbacks().iter().map(|font| font.to_string()).collect();
                (generic.as_str().to_string(), fonts)
            })
            .collect();
        Self {
            dev: false,
            process_css_variables: false,
            minify: MinifyConfig::default(),
            fallbacks,
        }
    }
}

impl FontlessConfig {
    pub fn from_json(json: &str) -> Result<Self, RewriteError> {
        let config: Self = serde_json::from_str(json)?;
        config.generic_fallbacks()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RewriteError> {
        let path_ref = path.as_ref();
        let json = fs::read_to_string(path_ref).map_err(|e| {
            RewriteError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read config from '{}': {}", path_ref.display(), e),
            ))
        })?;
        Self::from_json(&json)
    }

    /// The fallback table with its keys parsed as generic families.
    pub fn generic_fallbacks(&self) -> Result<Vec<(GenericFamily, Vec<String>)>, RewriteError> {
        let mut parsed = self
            .fallbacks
            .iter()
            .map(|(keyword, fonts)| {
                GenericFamily::parse(keyword)
                    .map(|generic| (generic, fonts.clone()))
                    .ok_or_else(|| {
                        RewriteError::Config(format!("Unknown generic font family in fallbacks: '{}'", keyword))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        parsed.sort_by_key(|(generic, _)| generic.as_str());
        Ok(parsed)
    }

    /// Installs the fallback table into an in-memory resolver.
    pub fn configure_resolver(&self, mut resolver: InMemoryFontResolver) -> Result<InMemoryFontResolver, RewriteError> {
        for (generic, fonts) in self.generic_fallbacks()? {
            resolver = resolver.with_generic_fallbacks(generic, fonts);
        }
        Ok(resolver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontless_types::Charset;

    #[test]
    fn test_defaults() {
        let config = FontlessConfig::default();
        assert!(!config.dev);
        assert!(!config.process_css_variables);
        assert_eq!(config.fallbacks["sans-serif"], vec!["Arial"]);
        assert_eq!(config.fallbacks["monospace"], vec!["Courier New"]);
        assert!(!config.fallbacks.contains_key("emoji"));
    }

    #[test]
    fn test_from_json_partial() {
        let config = FontlessConfig::from_json(
            r#"{ "dev": true, "minify": { "charset": "ascii", "targets": ["chrome 100"] }, "fallbacks": { "serif": ["Georgia"] } }"#,
        )
        .unwrap();
        assert!(config.dev);
        assert_eq!(config.minify.charset, Charset::Ascii);
        assert_eq!(config.minify.targets, vec!["chrome 100"]);
        assert!(config.minify.minify_whitespace);
        assert_eq!(config.fallbacks.len(), 1);
        assert_eq!(config.fallbacks["serif"], vec!["Georgia"]);
    }

    #[test]
    fn test_unknown_generic_is_rejected() {
        let err = FontlessConfig::from_json(r#"{ "fallbacks": { "sans": ["Arial"] } }"#).unwrap_err();
        assert!(matches!(err, RewriteError::Config(_)));
        assert!(err.to_string().contains("sans"));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(FontlessConfig::from_json("{"), Err(RewriteError::Json(_))));
    }
}
