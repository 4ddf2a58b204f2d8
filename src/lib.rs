//! # fontless
//!
//! Injects `@font-face` rules, with metric-matched fallback families, into
//! bundled CSS at build time.
//!
//! A host bundler drives [`FontlessPlugin`] through its hooks. Each stylesheet
//! is parsed, scanned for `font-family` and `font` declarations, and every
//! family not already declared is resolved through an injected
//! [`FontResolver`]. Generated rules are prepended to the stylesheet and the
//! synthetic fallback names are spliced into the original declarations; all
//! other text is left byte-for-byte unchanged.

pub mod config;
pub mod error;
pub mod minify;
pub mod plugin;
pub mod rewrite;

// Re-export foundation crates
pub use fontless_core as core;
pub use fontless_css as css;
pub use fontless_traits as traits;
pub use fontless_types as types;

pub use config::FontlessConfig;
pub use error::RewriteError;
pub use minify::LightningCssMinifier;
pub use plugin::{BuildConfig, ChunkInfo, FontlessBuilder, FontlessPlugin, OutputAsset, is_css_request};
pub use rewrite::{RewriteOptions, Rewriter};

pub use fontless_core::{EditBuffer, PreloadRegistry};
pub use fontless_traits::{
    CssMinifier, FontResolver, InMemoryFontResolver, MinifyError, NoPreload, PassthroughMinifier,
    PreloadPolicy, ResolveError,
};
pub use fontless_types::{
    Charset, FontFaceData, FontMetrics, FontSource, FontWeight, GenericFamily, MinifyConfig,
    ResolveOptions, ResolvedFontFamily,
};
