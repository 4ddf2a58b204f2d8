use serde::{Deserialize, Serialize};

/// Vertical and horizontal font metrics in font units.
///
/// These are the values needed to size-adjust a local fallback so it occupies
/// the same space as the web font it stands in for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontMetrics {
    pub units_per_em: f64,
    pub ascent: f64,
    pub descent: f64,
    #[serde(default)]
    pub line_gap: f64,
    /// Average width of lowercase glyphs, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x_width_avg: Option<f64>,
}

impl FontMetrics {
    pub const fn new(units_per_em: f64, ascent: f64, descent: f64, line_gap: f64, x_width_avg: f64) -> Self {
        Self { units_per_em, ascent, descent, line_gap, x_width_avg: Some(x_width_avg) }
    }

    /// Ratio of average glyph width to the em square.
    pub fn x_avg_ratio(&self) -> Option<f64> {
        match self.x_width_avg {
            Some(width) if width > 0.0 && self.units_per_em > 0.0 => Some(width / self.units_per_em),
            _ => None,
        }
    }
}
