//! Applies resolved families to a stylesheet's edit buffer.

use crate::edit::EditBuffer;
use crate::error::EditError;
use crate::generate::{fallback_css, fallback_family_name, font_face_css, quote};
use crate::preload::PreloadRegistry;
use crate::scan::Candidate;
use fontless_traits::{CssMinifier, PreloadPolicy};
use fontless_types::{MinifyConfig, ResolvedFontFamily};
use itertools::Itertools;
use log::{debug, warn};
use std::collections::HashSet;

/// Per-rewrite settings and capabilities used while injecting.
#[derive(Clone, Copy)]
pub struct InjectContext<'a> {
    /// Key under which preload URLs are recorded.
    pub asset_id: &'a str,
    /// Skip minification and end each generated rule with a newline.
    pub dev: bool,
    /// Directory of the published asset, for relativising font URLs.
    pub relative_to: Option<&'a str>,
    /// Minifier options; `None` leaves generated rules as rendered.
    pub minify: Option<&'a MinifyConfig>,
    pub minifier: &'a dyn CssMinifier,
    pub preload: &'a dyn PreloadPolicy,
    pub registry: &'a PreloadRegistry,
}

/// What applying one candidate changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Injection {
    /// Generated rules that were new to this stylesheet.
    pub inserted: usize,
    /// Synthetic fallback families spliced after the primary family.
    pub fallback_names: Vec<String>,
    pub preloaded: Option<String>,
}

/// Owns the edit state of one stylesheet rewrite.
///
/// Each call to [`Injector::apply`] runs to completion before the next, which
/// keeps the injected-rule check and insert atomic.
pub struct Injector<'a> {
    buffer: EditBuffer,
    injected: HashSet<String>,
    cx: InjectContext<'a>,
}

impl<'a> Injector<'a> {
    pub fn new(source: impl Into<String>, cx: InjectContext<'a>) -> Self {
        Self {
            buffer: EditBuffer::new(source),
            injected: HashSet::new(),
            cx,
        }
    }

    pub fn apply(&mut self, candidate: &Candidate, resolved: &ResolvedFontFamily) -> Result<Injection, EditError> {
        let family = candidate.family.as_str();
        let mut injection = Injection::default();

        let fallbacks: Vec<(&str, String)> = resolved
            .fallbacks
            .iter()
            .map(|local| (local.as_str(), fallback_family_name(family, local)))
            .collect();

        if let Some(first) = resolved.fonts.first()
            && self.cx.preload.should_preload(family, first)
            && let Some(url) = first.first_remote_url()
        {
            self.cx.registry.record(self.cx.asset_id, url);
            injection.preloaded = Some(url.to_string());
        }

        let relative_to = self.cx.relative_to;
        let generated = resolved
            .fonts
            .iter()
            .map(|face| font_face_css(family, face, relative_to))
            .chain(
                fallbacks
                    .iter()
                    .map(|(local, name)| fallback_css(name, local, resolved.metrics.as_ref())),
            );

        let mut queued = Vec::new();
        for css in generated {
            if !self.injected.insert(css.clone()) {
                continue;
            }
            queued.push(self.finalize(css));
        }
        injection.inserted = queued.len();
        if !queued.is_empty() {
            self.buffer.prepend(&queued.concat());
        }

        if !fallbacks.is_empty()
            && let Some(offset) = candidate.insertion_offset
        {
            let names = fallbacks.iter().map(|(_, name)| quote(name)).join(", ");
            self.buffer.append_left(offset, &format!(", {}", names))?;
            injection.fallback_names = fallbacks.into_iter().map(|(_, name)| name).collect();
        }

        debug!(
            "Applied '{}' in {}: {} new rule(s), {} fallback name(s)",
            family,
            self.cx.asset_id,
            injection.inserted,
            injection.fallback_names.len()
        );
        Ok(injection)
    }

    fn finalize(&self, css: String) -> String {
        if self.cx.dev {
            return css + "\n";
        }
        let Some(config) = self.cx.minify else {
            return css;
        };
        match self.cx.minifier.minify(&css, config) {
            Ok(minified) => minified,
            Err(e) => {
                warn!("{} failed on generated @font-face, keeping it unminified: {}", self.cx.minifier.name(), e);
                css
            }
        }
    }

    pub fn into_buffer(self) -> EditBuffer {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fontless_traits::{MinifyError, NoPreload, PassthroughMinifier};
    use fontless_types::{FontFaceData, FontSource, ResolveOptions};

    #[derive(Debug)]
    struct FailingMinifier;

    impl CssMinifier for FailingMinifier {
        fn minify(&self, _css: &str, _config: &MinifyConfig) -> Result<String, MinifyError> {
            Err(MinifyError::Minify("boom".to_string()))
        }

        fn name(&self) -> &'static str {
            "FailingMinifier"
        }
    }

    fn candidate(family: &str, offset: Option<usize>) -> Candidate {
        Candidate {
            family: family.to_string(),
            options: ResolveOptions::default(),
            insertion_offset: offset,
        }
    }

    fn foo() -> ResolvedFontFamily {
        ResolvedFontFamily::new(vec![FontFaceData::new(vec![FontSource::url_with_format(
            "/_fonts/foo.woff2",
            "woff2",
        )])])
        .with_fallbacks(["Arial"])
    }

    fn context<'a>(
        minify: &'a MinifyConfig,
        minifier: &'a dyn CssMinifier,
        preload: &'a dyn PreloadPolicy,
        registry: &'a PreloadRegistry,
    ) -> InjectContext<'a> {
        InjectContext {
            asset_id: "a.css",
            dev: true,
            relative_to: None,
            minify: Some(minify),
            minifier,
            preload,
            registry,
        }
    }

    #[test]
    fn test_apply_prepends_rules_and_splices_fallbacks() {
        let minify = MinifyConfig::default();
        let registry = PreloadRegistry::new();
        let mut injector = Injector::new(
            "a{font-family:\"Foo\"}",
            context(&minify, &PassthroughMinifier, &NoPreload, &registry),
        );

        let injection = injector.apply(&candidate("Foo", Some(19)), &foo()).unwrap();
        assert_eq!(injection.inserted, 2);
        assert_eq!(injection.fallback_names, vec!["Foo Fallback: Arial"]);
        assert_eq!(injection.preloaded, None);

        let out = injector.into_buffer().render();
        assert!(out.starts_with("@font-face {\n  font-family: \"Foo\";"));
        assert!(out.contains("font-family: \"Foo Fallback: Arial\";\n  src: local(\"Arial\");\n}\n"));
        assert!(out.ends_with("a{font-family:\"Foo\", \"Foo Fallback: Arial\"}"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_identical_rules_are_injected_once() {
        let minify = MinifyConfig::default();
        let registry = PreloadRegistry::new();
        let source = "a{font-family:Foo}b{font-family:Foo}";
        let mut injector = Injector::new(source, context(&minify, &PassthroughMinifier, &NoPreload, &registry));

        assert_eq!(injector.apply(&candidate("Foo", Some(17)), &foo()).unwrap().inserted, 2);
        assert_eq!(injector.apply(&candidate("Foo", Some(35)), &foo()).unwrap().inserted, 0);

        let out = injector.buffer.render();
        assert_eq!(out.matches("font-family: \"Foo\";").count(), 1);
        assert!(out.ends_with(
            "a{font-family:Foo, \"Foo Fallback: Arial\"}b{font-family:Foo, \"Foo Fallback: Arial\"}"
        ));
    }

    #[test]
    fn test_missing_offset_still_prepends() {
        let minify = MinifyConfig::default();
        let registry = PreloadRegistry::new();
        let mut injector = Injector::new(
            ":root{--f:Foo}",
            context(&minify, &PassthroughMinifier, &NoPreload, &registry),
        );

        let injection = injector.apply(&candidate("Foo", None), &foo()).unwrap();
        assert_eq!(injection.inserted, 2);
        assert!(injection.fallback_names.is_empty());
        assert!(injector.buffer.render().ends_with("}\n:root{--f:Foo}"));
    }

    #[test]
    fn test_preload_records_first_remote_url() {
        let minify = MinifyConfig::default();
        let registry = PreloadRegistry::new();
        let policy = |family: &str, _face: &FontFaceData| family == "Foo";
        let mut injector = Injector::new("a{font-family:Foo}", context(&minify, &PassthroughMinifier, &policy, &registry));

        let injection = injector.apply(&candidate("Foo", Some(17)), &foo()).unwrap();
        assert_eq!(injection.preloaded.as_deref(), Some("/_fonts/foo.woff2"));
        assert_eq!(registry.urls_for("a.css"), vec!["/_fonts/foo.woff2"]);
    }

    #[test]
    fn test_minify_failure_keeps_generated_text() {
        let minify = MinifyConfig::default();
        let registry = PreloadRegistry::new();
        let mut cx = context(&minify, &FailingMinifier, &NoPreload, &registry);
        cx.dev = false;
        let mut injector = Injector::new("a{font-family:Foo}", cx);

        injector.apply(&candidate("Foo", Some(17)), &foo()).unwrap();
        let out = injector.buffer.render();
        assert!(out.starts_with("@font-face {\n  font-family: \"Foo\";"));
        assert!(!out.contains("}\n@font-face"));
    }

    #[test]
    fn test_out_of_bounds_offset_is_an_error() {
        let minify = MinifyConfig::default();
        let registry = PreloadRegistry::new();
        let mut injector = Injector::new("a{}", context(&minify, &PassthroughMinifier, &NoPreload, &registry));
        let err = injector.apply(&candidate("Foo", Some(99)), &foo()).unwrap_err();
        assert_eq!(err, EditError::OutOfBounds { offset: 99, len: 3 });
    }

    #[test]
    fn test_no_fonts_and_no_fallbacks_is_a_no_op() {
        let minify = MinifyConfig::default();
        let registry = PreloadRegistry::new();
        let mut injector = Injector::new("a{font-family:Foo}", context(&minify, &PassthroughMinifier, &NoPreload, &registry));
        let injection = injector.apply(&candidate("Foo", Some(17)), &ResolvedFontFamily::default()).unwrap();
        assert_eq!(injection, Injection::default());
        assert!(!injector.buffer.has_changed());
    }
}
