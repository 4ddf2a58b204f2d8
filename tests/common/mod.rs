pub mod fixtures;

use async_trait::async_trait;
use fontless::{
    CssMinifier, FontResolver, InMemoryFontResolver, MinifyConfig, MinifyError, PassthroughMinifier,
    ResolveError, ResolveOptions, ResolvedFontFamily, Rewriter,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Wraps a resolver, counting calls and yielding before each answer so
/// concurrent resolutions interleave.
#[derive(Debug)]
pub struct CountingResolver {
    inner: InMemoryFontResolver,
    calls: AtomicUsize,
}

impl CountingResolver {
    pub fn new(inner: InMemoryFontResolver) -> Self {
        Self { inner, calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FontResolver for CountingResolver {
    async fn resolve(
        &self,
        family: &str,
        options: &ResolveOptions,
    ) -> Result<Option<ResolvedFontFamily>, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.inner.resolve(family, options).await
    }

    fn name(&self) -> &'static str {
        "CountingResolver"
    }
}

/// Fails every lookup.
#[derive(Debug)]
pub struct FailingResolver;

#[async_trait]
impl FontResolver for FailingResolver {
    async fn resolve(
        &self,
        family: &str,
        _options: &ResolveOptions,
    ) -> Result<Option<ResolvedFontFamily>, ResolveError> {
        Err(ResolveError::Backend {
            family: family.to_string(),
            message: "backend offline".to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "FailingResolver"
    }
}

/// Rejects all input.
#[derive(Debug)]
pub struct FailingMinifier;

impl CssMinifier for FailingMinifier {
    fn minify(&self, _css: &str, _config: &MinifyConfig) -> Result<String, MinifyError> {
        Err(MinifyError::Minify("unsupported".to_string()))
    }

    fn name(&self) -> &'static str {
        "FailingMinifier"
    }
}

/// A rewriter that leaves generated rules as rendered.
pub fn plain_rewriter(resolver: Arc<dyn FontResolver>) -> Rewriter {
    Rewriter::new(resolver, Arc::new(PassthroughMinifier))
}

/// Number of `@font-face` rules declaring exactly `family`.
pub fn count_faces(css: &str, family: &str) -> usize {
    let readable = format!("font-family: \"{}\";", family);
    let minified = format!("font-family:{};", family);
    css.matches(&readable).count() + css.matches(&minified).count()
}
