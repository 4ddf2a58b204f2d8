use crate::font::FontFaceData;
use crate::generic::GenericFamily;
use crate::metrics::FontMetrics;
use serde::{Deserialize, Serialize};

/// Context handed to a font resolver alongside the family name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveOptions {
    /// Families the author listed after the primary one.
    #[serde(default)]
    pub fallbacks: Vec<String>,
    /// The generic family keyword found in the declaration, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generic: Option<GenericFamily>,
}

/// What a resolver knows about one family.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedFontFamily {
    pub fonts: Vec<FontFaceData>,
    /// Local fonts to derive metric-matched fallback families from.
    #[serde(default)]
    pub fallbacks: Vec<String>,
    /// Metrics of the resolved family, when the backend could read them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<FontMetrics>,
}

impl ResolvedFontFamily {
    pub fn new(fonts: Vec<FontFaceData>) -> Self {
        Self { fonts, ..Default::default() }
    }

    pub fn with_fallbacks<I, S>(mut self, fallbacks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallbacks = fallbacks.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_metrics(mut self, metrics: FontMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }
}
