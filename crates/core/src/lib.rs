//! # fontless-core
//!
//! Platform-agnostic stylesheet rewriting core.
//!
//! This crate provides the synchronous pieces of a rewrite:
//! - **scan**: finds families declared by `@font-face` and candidate declarations
//! - **generate**: renders `@font-face` and metric-matched fallback rules
//! - **inject**: applies one resolved family to a stylesheet's edits
//! - **edit**: insertion-only overlay over the original source
//! - **preload**: build-wide registry of font URLs to preload
//!
//! ## Design Principle
//!
//! This crate has **no platform dependencies**:
//! - No async runtime (`tokio`)
//! - No font lookups; resolution is injected through `fontless_traits`
//! - No minifier backend; minification is injected the same way

// Re-export foundation crates
pub use fontless_css as css;
pub use fontless_traits as traits;
pub use fontless_types as types;

pub mod edit;
pub mod error;
pub mod generate;
pub mod inject;
pub mod metrics;
pub mod preload;
pub mod scan;

pub use edit::EditBuffer;
pub use error::EditError;
pub use inject::{InjectContext, Injection, Injector};
pub use metrics::{FallbackOverrides, system_font_metrics};
pub use preload::PreloadRegistry;
pub use scan::{Candidate, declared_families, find_candidates};
