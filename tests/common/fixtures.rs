use fontless::{
    FontFaceData, FontMetrics, FontSource, GenericFamily, InMemoryFontResolver, ResolvedFontFamily,
};

pub const FOO_URL: &str = "/_fonts/foo.woff2";

pub const FOO_FACE: &str = "@font-face {\n  font-family: \"Foo\";\n  src: url(\"/_fonts/foo.woff2\") format(\"woff2\");\n  font-display: swap;\n  font-weight: 400;\n}";

pub const FOO_ARIAL_FALLBACK: &str =
    "@font-face {\n  font-family: \"Foo Fallback: Arial\";\n  src: local(\"Arial\");\n}";

pub fn foo_face() -> FontFaceData {
    FontFaceData::new(vec![FontSource::url_with_format(FOO_URL, "woff2")]).with_weight(400)
}

/// "Foo" with one remote face and an Arial fallback, without metrics.
pub fn foo_family() -> ResolvedFontFamily {
    ResolvedFontFamily::new(vec![foo_face()]).with_fallbacks(["Arial"])
}

/// "Bar" with two faces, metrics, and no registered fallbacks.
pub fn bar_family() -> ResolvedFontFamily {
    ResolvedFontFamily::new(vec![
        FontFaceData::new(vec![FontSource::url_with_format("/_fonts/bar-400.woff2", "woff2")]).with_weight(400),
        FontFaceData::new(vec![FontSource::url_with_format("/_fonts/bar-700.woff2", "woff2")]).with_weight(700),
    ])
    .with_metrics(FontMetrics::new(1000.0, 950.0, -250.0, 0.0, 480.0))
}

pub fn font_table() -> InMemoryFontResolver {
    let resolver = InMemoryFontResolver::new()
        .with_generic_fallbacks(GenericFamily::SansSerif, ["Arial"])
        .with_generic_fallbacks(GenericFamily::Serif, ["Times New Roman"]);
    resolver.register("Foo", foo_family()).expect("register Foo");
    resolver.register("Bar", bar_family()).expect("register Bar");
    resolver
}
