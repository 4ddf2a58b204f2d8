//! Text generators for `@font-face` rules.

use crate::metrics::{FallbackOverrides, system_font_metrics};
use fontless_types::{FontFaceData, FontMetrics, FontSource};
use itertools::Itertools;

/// Quotes `value` as a CSS string.
pub fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// The synthetic family name for `fallback` standing in for `family`.
pub fn fallback_family_name(family: &str, fallback: &str) -> String {
    format!("{} Fallback: {}", family, fallback)
}

/// Rewrites a root-absolute URL so it resolves from the directory `relative_to`.
///
/// URLs with a scheme, protocol-relative URLs, and relative URLs are returned
/// unchanged.
pub fn relative_url(url: &str, relative_to: &str) -> String {
    let Some(path) = url.strip_prefix('/') else {
        return url.to_string();
    };
    if path.starts_with('/') {
        return url.to_string();
    }
    let depth = relative_to
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .fold(0usize, |depth, segment| {
            if segment == ".." { depth.saturating_sub(1) } else { depth + 1 }
        });
    format!("{}{}", "../".repeat(depth), path)
}

fn source_css(source: &FontSource, relative_to: Option<&str>) -> String {
    match source {
        FontSource::Url { url, format, tech } => {
            let url = match relative_to {
                Some(dir) => relative_url(url, dir),
                None => url.clone(),
            };
            let mut out = format!("url({})", quote(&url));
            if let Some(format) = format {
                out.push_str(&format!(" format({})", quote(format)));
            }
            if let Some(tech) = tech {
                out.push_str(&format!(" tech({})", tech));
            }
            out
        }
        FontSource::Local { name } => format!("local({})", quote(name)),
    }
}

fn rule(descriptors: &[(&str, String)]) -> String {
    let body = descriptors
        .iter()
        .map(|(name, value)| format!("  {}: {};", name, value))
        .join("\n");
    format!("@font-face {{\n{}\n}}", body)
}

/// Renders one `@font-face` rule for `face` under `family`.
///
/// Remote sources are relativised against `relative_to` when it is set.
pub fn font_face_css(family: &str, face: &FontFaceData, relative_to: Option<&str>) -> String {
    let mut descriptors = vec![
        ("font-family", quote(family)),
        (
            "src",
            face.src.iter().map(|source| source_css(source, relative_to)).join(", "),
        ),
        ("font-display", face.display.clone().unwrap_or_else(|| "swap".to_string())),
    ];
    let optional = [
        ("font-weight", face.weight.as_ref().map(|weight| weight.css_value())),
        ("font-style", face.style.clone()),
        ("font-stretch", face.stretch.clone()),
        ("unicode-range", face.unicode_range.clone()),
        ("font-feature-settings", face.feature_settings.clone()),
        ("font-variation-settings", face.variation_settings.clone()),
    ];
    descriptors.extend(
        optional
            .into_iter()
            .filter_map(|(name, value)| value.map(|value| (name, value))),
    );
    rule(&descriptors)
}

/// Renders a fallback family aliasing the local font `local_font`.
///
/// Size and vertical metric overrides are included when both the primary
/// metrics and the local font's metrics are known.
pub fn fallback_css(name: &str, local_font: &str, primary: Option<&FontMetrics>) -> String {
    let mut descriptors = vec![
        ("font-family", quote(name)),
        ("src", format!("local({})", quote(local_font))),
    ];
    if let (Some(primary), Some(local)) = (primary, system_font_metrics(local_font)) {
        descriptors.extend(FallbackOverrides::compute(primary, &local).descriptors());
    }
    rule(&descriptors)
}
