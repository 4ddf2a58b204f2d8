use serde::{Deserialize, Serialize};

/// A single entry of an `@font-face` `src` descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontSource {
    Url {
        url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        format: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tech: Option<String>,
    },
    Local {
        name: String,
    },
}

impl FontSource {
    pub fn url(url: impl Into<String>) -> Self {
        FontSource::Url { url: url.into(), format: None, tech: None }
    }

    pub fn url_with_format(url: impl Into<String>, format: impl Into<String>) -> Self {
        FontSource::Url { url: url.into(), format: Some(format.into()), tech: None }
    }

    pub fn local(name: impl Into<String>) -> Self {
        FontSource::Local { name: name.into() }
    }

    /// Returns the URL when this is a remote source.
    pub fn as_url(&self) -> Option<&str> {
        match self {
            FontSource::Url { url, .. } => Some(url),
            FontSource::Local { .. } => None,
        }
    }
}

/// A `font-weight` descriptor: one value or a variable-font range.
///
/// Deserializes from strings or numbers, e.g. `"bold"`, `400` or `[100, 900]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged, from = "WeightRepr")]
pub enum FontWeight {
    Single(String),
    Range(String, String),
}

impl FontWeight {
    pub fn css_value(&self) -> String {
        match self {
            FontWeight::Single(weight) => weight.clone(),
            FontWeight::Range(min, max) => format!("{} {}", min, max),
        }
    }
}

impl From<u16> for FontWeight {
    fn from(weight: u16) -> Self {
        FontWeight::Single(weight.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WeightValue {
    Number(f64),
    Text(String),
}

impl From<WeightValue> for String {
    fn from(value: WeightValue) -> Self {
        match value {
            WeightValue::Number(n) => format!("{}", n),
            WeightValue::Text(text) => text,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WeightRepr {
    Single(WeightValue),
    Range(WeightValue, WeightValue),
}

impl From<WeightRepr> for FontWeight {
    fn from(repr: WeightRepr) -> Self {
        match repr {
            WeightRepr::Single(weight) => FontWeight::Single(weight.into()),
            WeightRepr::Range(min, max) => FontWeight::Range(min.into(), max.into()),
        }
    }
}

/// One concrete font face resolved for a family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontFaceData {
    pub src: Vec<FontSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<FontWeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stretch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unicode_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_settings: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation_settings: Option<String>,
}

impl FontFaceData {
    pub fn new(src: Vec<FontSource>) -> Self {
        Self { src, ..Default::default() }
    }

    pub fn with_weight(mut self, weight: impl Into<FontWeight>) -> Self {
        self.weight = Some(weight.into());
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// The first remote source of this face, if it has one.
    pub fn first_remote_url(&self) -> Option<&str> {
        self.src.iter().find_map(FontSource::as_url)
    }
}
