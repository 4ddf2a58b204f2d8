//! Hooks a host bundler calls during a build, and the builder that wires them up.

use crate::config::FontlessConfig;
use crate::error::RewriteError;
use crate::minify::LightningCssMinifier;
use crate::rewrite::{RewriteOptions, Rewriter};
use fontless_core::PreloadRegistry;
use fontless_traits::{CssMinifier, FontResolver, NoPreload, PreloadPolicy};
use fontless_types::MinifyConfig;
use log::{debug, info};
use std::sync::{Arc, OnceLock};

/// Stylesheet extensions handled by [`FontlessPlugin::transform`].
const CSS_EXTENSIONS: &[&str] = &[".css", ".scss", ".sass", ".less", ".styl", ".pcss", ".postcss"];

/// Build settings reported by the host once its configuration is final.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildConfig {
    /// Browserslist queries for the CSS target environment.
    pub css_targets: Vec<String>,
    /// Whether the host minifies CSS at all.
    pub minify: bool,
}

/// An output chunk and the modules it was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkInfo {
    pub facade_module_id: Option<String>,
    pub module_ids: Vec<String>,
}

/// A file in the final output bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputAsset {
    pub file_name: String,
    pub source: String,
}

impl OutputAsset {
    pub fn new(file_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            source: source.into(),
        }
    }
}

/// Whether a module id names a stylesheet that should be transformed.
pub fn is_css_request(id: &str) -> bool {
    let (path, query) = match id.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (id, None),
    };
    if let Some(query) = query
        && query
            .split('&')
            .any(|param| matches!(param.split('=').next(), Some("raw" | "url")))
    {
        return false;
    }
    CSS_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Build-session state and the hooks that drive it.
#[derive(Debug)]
pub struct FontlessPlugin {
    config: FontlessConfig,
    rewriter: Rewriter,
    /// Minify settings captured from the host; `None` inside when the host does not minify.
    build_minify: OnceLock<Option<MinifyConfig>>,
}

impl FontlessPlugin {
    pub fn builder() -> FontlessBuilder {
        FontlessBuilder::new()
    }

    pub fn config(&self) -> &FontlessConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<PreloadRegistry> {
        self.rewriter.registry()
    }

    /// URLs to preload for an asset or chunk facade.
    pub fn preload_urls(&self, asset_id: &str) -> Vec<String> {
        self.registry().urls_for(asset_id)
    }

    /// Captures the host's CSS targets and minify setting.
    ///
    /// Only the first call in a non-development build has any effect.
    pub fn config_resolved(&self, build: &BuildConfig) {
        if self.config.dev {
            return;
        }
        self.build_minify.get_or_init(|| {
            if !build.minify {
                info!("Host does not minify CSS; generated @font-face rules stay unminified");
                return None;
            }
            let mut minify = self.config.minify.clone();
            if !build.css_targets.is_empty() {
                minify.targets = build.css_targets.clone();
            }
            debug!("Minifying generated rules for targets {:?}", minify.targets);
            Some(minify)
        });
    }

    /// The minify settings in effect for this build.
    pub fn minify_config(&self) -> Option<&MinifyConfig> {
        if self.config.dev {
            return None;
        }
        match self.build_minify.get() {
            Some(captured) => captured.as_ref(),
            None => Some(&self.config.minify),
        }
    }

    fn options_for(&self, asset_id: &str) -> RewriteOptions {
        RewriteOptions {
            asset_id: asset_id.to_string(),
            dev: self.config.dev,
            process_css_variables: self.config.process_css_variables,
            relative_to: None,
            minify: self.minify_config().cloned(),
        }
    }

    /// Rewrites a stylesheet module during transformation.
    ///
    /// Returns `None` for non-stylesheet ids and for stylesheets that need no
    /// change.
    pub async fn transform(&self, code: &str, id: &str) -> Result<Option<String>, RewriteError> {
        if !is_css_request(id) {
            return Ok(None);
        }
        let buffer = self.rewriter.rewrite(code, &self.options_for(id)).await?;
        if !buffer.has_changed() {
            return Ok(None);
        }
        debug!("Injected font faces into {}", id);
        Ok(Some(buffer.render()))
    }

    /// Propagates preload URLs from a chunk's modules to its facade module.
    ///
    /// Returns the number of URLs newly attached to the facade.
    pub fn render_chunk(&self, chunk: &ChunkInfo) -> usize {
        let Some(facade) = chunk.facade_module_id.as_deref() else {
            return 0;
        };
        self.registry()
            .merge_into(facade, chunk.module_ids.iter().map(String::as_str))
    }

    /// Rewrites every CSS asset of the final bundle in place.
    ///
    /// Font URLs are made relative to each asset's directory. Assets are only
    /// replaced when the rewrite changed them. Returns the number of rewritten
    /// assets.
    pub async fn generate_bundle(&self, assets: &mut [OutputAsset]) -> Result<usize, RewriteError> {
        let mut rewritten = 0;
        for asset in assets.iter_mut().filter(|asset| asset.file_name.ends_with(".css")) {
            let dir = asset
                .file_name
                .rsplit_once('/')
                .map(|(dir, _)| dir)
                .unwrap_or_default();
            let mut options = self.options_for(&asset.file_name);
            options.relative_to = Some(dir.to_string());

            let buffer = self.rewriter.rewrite(&asset.source, &options).await?;
            if buffer.has_changed() {
                asset.source = buffer.render();
                rewritten += 1;
                info!("Injected font faces into {}", asset.file_name);
            }
        }
        Ok(rewritten)
    }
}

/// A builder for creating a `FontlessPlugin`.
pub struct FontlessBuilder {
    config: FontlessConfig,
    resolver: Option<Arc<dyn FontResolver>>,
    preload: Arc<dyn PreloadPolicy>,
    minifier: Arc<dyn CssMinifier>,
    registry: Option<Arc<PreloadRegistry>>,
}

impl Default for FontlessBuilder {
    fn default() -> Self {
        Self {
            config: FontlessConfig::default(),
            resolver: None,
            preload: Arc::new(NoPreload),
            minifier: Arc::new(LightningCssMinifier::new()),
            registry: None,
        }
    }
}

impl FontlessBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(mut self, config: FontlessConfig) -> Self {
        self.config = config;
        self
    }

    /// Loads the configuration from a JSON file.
    pub fn with_config_file<P: AsRef<std::path::Path>>(mut self, path: P) -> Result<Self, RewriteError> {
        self.config = FontlessConfig::from_file(path)?;
        Ok(self)
    }

    pub fn with_dev(mut self, dev: bool) -> Self {
        self.config.dev = dev;
        self
    }

    pub fn with_css_variables(mut self, process: bool) -> Self {
        self.config.process_css_variables = process;
        self
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn FontResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn with_preload_policy(mut self, preload: Arc<dyn PreloadPolicy>) -> Self {
        self.preload = preload;
        self
    }

    pub fn with_minifier(mut self, minifier: Arc<dyn CssMinifier>) -> Self {
        self.minifier = minifier;
        self
    }

    /// Shares a registry owned elsewhere in the build session.
    pub fn with_registry(mut self, registry: Arc<PreloadRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Consumes the builder and creates the `FontlessPlugin`.
    pub fn build(self) -> Result<FontlessPlugin, RewriteError> {
        let resolver = self.resolver.ok_or_else(|| {
            RewriteError::Config("No font resolver has been configured. Use `with_resolver`.".to_string())
        })?;
        self.config.generic_fallbacks()?;

        let mut rewriter = Rewriter::new(resolver, self.minifier).with_preload_policy(self.preload);
        if let Some(registry) = self.registry {
            rewriter = rewriter.with_registry(registry);
        }
        info!(
            "Fontless plugin ready (dev: {}, css variables: {})",
            self.config.dev, self.config.process_css_variables
        );
        Ok(FontlessPlugin {
            config: self.config,
            rewriter,
            build_minify: OnceLock::new(),
        })
    }
}
