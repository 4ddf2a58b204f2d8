//! The asynchronous rewrite of one stylesheet.

use crate::error::RewriteError;
use fontless_core::{EditBuffer, InjectContext, Injector, PreloadRegistry, declared_families, find_candidates};
use fontless_css::parse_stylesheet;
use fontless_traits::{CssMinifier, FontResolver, NoPreload, PreloadPolicy};
use fontless_types::MinifyConfig;
use log::{debug, trace};
use std::fmt;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinSet;

/// Per-stylesheet settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteOptions {
    /// Key for preload URLs recorded by this rewrite.
    pub asset_id: String,
    pub dev: bool,
    pub process_css_variables: bool,
    /// Directory of the published asset; root-absolute font URLs are made relative to it.
    pub relative_to: Option<String>,
    /// `None` leaves generated rules unminified.
    pub minify: Option<MinifyConfig>,
}

impl RewriteOptions {
    pub fn new(asset_id: impl Into<String>) -> Self {
        Self {
            asset_id: asset_id.into(),
            ..Default::default()
        }
    }

    pub fn with_dev(mut self, dev: bool) -> Self {
        self.dev = dev;
        self
    }

    pub fn with_css_variables(mut self, process: bool) -> Self {
        self.process_css_variables = process;
        self
    }

    pub fn with_relative_to(mut self, dir: impl Into<String>) -> Self {
        self.relative_to = Some(dir.into());
        self
    }

    pub fn with_minify(mut self, minify: MinifyConfig) -> Self {
        self.minify = Some(minify);
        self
    }
}

/// Rewrites stylesheets using injected capabilities.
///
/// Cheap to clone; every capability is shared.
#[derive(Clone)]
pub struct Rewriter {
    resolver: Arc<dyn FontResolver>,
    preload: Arc<dyn PreloadPolicy>,
    minifier: Arc<dyn CssMinifier>,
    registry: Arc<PreloadRegistry>,
}

impl fmt::Debug for Rewriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rewriter")
            .field("resolver", &self.resolver.name())
            .field("minifier", &self.minifier.name())
            .finish_non_exhaustive()
    }
}

impl Rewriter {
    pub fn new(resolver: Arc<dyn FontResolver>, minifier: Arc<dyn CssMinifier>) -> Self {
        Self {
            resolver,
            preload: Arc::new(NoPreload),
            minifier,
            registry: Arc::new(PreloadRegistry::new()),
        }
    }

    pub fn with_preload_policy(mut self, preload: Arc<dyn PreloadPolicy>) -> Self {
        self.preload = preload;
        self
    }

    /// Shares an existing registry, typically one owned by the build session.
    pub fn with_registry(mut self, registry: Arc<PreloadRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry(&self) -> &Arc<PreloadRegistry> {
        &self.registry
    }

    /// Rewrites `css`, returning the staged edits.
    ///
    /// Every candidate's family is resolved concurrently as a task on the
    /// current tokio runtime. Results are applied in completion order, so rules
    /// for distinct families may be prepended in any order. Any error discards
    /// the whole rewrite; pending resolutions are aborted.
    ///
    /// A stylesheet with font candidates must be rewritten inside a tokio
    /// runtime, otherwise [`RewriteError::Runtime`] is returned.
    pub async fn rewrite(&self, css: &str, options: &RewriteOptions) -> Result<EditBuffer, RewriteError> {
        let stylesheet = parse_stylesheet(css)
            .inspect_err(|e| debug!("Failed to parse {} at byte {}", options.asset_id, e.offset()))?;
        let declared = declared_families(&stylesheet)?;
        let candidates = find_candidates(&stylesheet, &declared, options.process_css_variables)?;

        let mut injector = Injector::new(
            css,
            InjectContext {
                asset_id: &options.asset_id,
                dev: options.dev,
                relative_to: options.relative_to.as_deref(),
                minify: options.minify.as_ref(),
                minifier: self.minifier.as_ref(),
                preload: self.preload.as_ref(),
                registry: &self.registry,
            },
        );
        if candidates.is_empty() {
            return Ok(injector.into_buffer());
        }

        debug!(
            "Resolving {} candidate(s) in {} with {}",
            candidates.len(),
            options.asset_id,
            self.resolver.name()
        );
        let runtime = Handle::try_current().map_err(|e| RewriteError::Runtime(e.to_string()))?;
        let mut tasks = JoinSet::new();
        for (index, candidate) in candidates.iter().enumerate() {
            let resolver = Arc::clone(&self.resolver);
            let family = candidate.family.clone();
            let resolve_options = candidate.options.clone();
            tasks.spawn_on(async move { (index, resolver.resolve(&family, &resolve_options).await) }, &runtime);
        }

        while let Some(joined) = tasks.join_next().await {
            let (index, resolved) = joined?;
            let candidate = &candidates[index];
            match resolved? {
                Some(resolved) => {
                    injector.apply(candidate, &resolved)?;
                }
                None => trace!("No fonts found for '{}'", candidate.family),
            }
        }
        Ok(injector.into_buffer())
    }
}
