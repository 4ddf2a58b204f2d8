//! Metric overrides that make a local font occupy the same space as a web font.

use fontless_types::FontMetrics;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Metrics of widely installed system fonts, keyed by lowercase family name.
static SYSTEM_FONT_METRICS: Lazy<HashMap<&'static str, FontMetrics>> = Lazy::new(|| {
    HashMap::from([
        ("arial", FontMetrics::new(2048.0, 1854.0, -434.0, 67.0, 904.0)),
        ("times new roman", FontMetrics::new(2048.0, 1825.0, -443.0, 87.0, 819.0)),
        ("courier new", FontMetrics::new(2048.0, 1705.0, -615.0, 0.0, 1229.0)),
        ("helvetica neue", FontMetrics::new(1000.0, 952.0, -213.0, 28.0, 450.0)),
        ("roboto", FontMetrics::new(2048.0, 1900.0, -500.0, 0.0, 911.0)),
        ("segoe ui", FontMetrics::new(2048.0, 2210.0, -514.0, 0.0, 908.0)),
        ("georgia", FontMetrics::new(2048.0, 1878.0, -449.0, 0.0, 913.0)),
        ("noto sans", FontMetrics::new(1000.0, 1069.0, -293.0, 0.0, 442.0)),
    ])
});

/// Looks up a built-in system font, ignoring ASCII case.
pub fn system_font_metrics(family: &str) -> Option<FontMetrics> {
    SYSTEM_FONT_METRICS.get(family.to_ascii_lowercase().as_str()).copied()
}

/// `@font-face` descriptor values for a metric-matched fallback, as ratios.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackOverrides {
    pub size_adjust: f64,
    pub ascent: f64,
    pub descent: f64,
    pub line_gap: f64,
}

impl FallbackOverrides {
    /// Scales `fallback` to match `primary`.
    ///
    /// The size adjustment compares average glyph widths; when either width is
    /// unknown the fallback is not resized.
    pub fn compute(primary: &FontMetrics, fallback: &FontMetrics) -> Self {
        let size_adjust = match (primary.x_avg_ratio(), fallback.x_avg_ratio()) {
            (Some(primary_ratio), Some(fallback_ratio)) => primary_ratio / fallback_ratio,
            _ => 1.0,
        };
        let adjusted_em = primary.units_per_em * size_adjust;
        Self {
            size_adjust,
            ascent: primary.ascent / adjusted_em,
            descent: primary.descent.abs() / adjusted_em,
            line_gap: primary.line_gap / adjusted_em,
        }
    }

    /// The overrides as `(descriptor, value)` pairs in emission order.
    pub fn descriptors(&self) -> [(&'static str, String); 4] {
        [
            ("size-adjust", format_percent(self.size_adjust)),
            ("ascent-override", format_percent(self.ascent)),
            ("descent-override", format_percent(self.descent)),
            ("line-gap-override", format_percent(self.line_gap)),
        ]
    }
}

/// Formats a ratio as a percentage with at most four decimals.
pub fn format_percent(ratio: f64) -> String {
    let formatted = format!("{:.4}", ratio * 100.0);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    let trimmed = if trimmed == "-0" { "0" } else { trimmed };
    format!("{}%", trimmed)
}
