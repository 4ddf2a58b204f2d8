//! FontResolver trait for turning a family name into concrete font faces.
//!
//! The rewriter never looks fonts up itself. Hosts inject a resolver that may
//! hit the network, a local font directory, or a pre-populated table.

use async_trait::async_trait;
use fontless_types::{GenericFamily, ResolveOptions, ResolvedFontFamily};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;
use thiserror::Error;

/// Error type for font resolution.
///
/// A family the backend does not know is not an error; resolvers return
/// `Ok(None)` for that.
#[derive(Error, Debug, Clone)]
pub enum ResolveError {
    #[error("Font resolver is not available: {0}")]
    NotAvailable(String),

    #[error("Failed to resolve font family '{family}': {message}")]
    Backend { family: String, message: String },

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ResolveError {
    fn from(err: std::io::Error) -> Self {
        ResolveError::Io(err.to_string())
    }
}

/// Resolves font families to `@font-face` data and fallback fonts.
///
/// Called once per candidate declaration, concurrently, so implementations
/// must be safe to share across tasks.
#[async_trait]
pub trait FontResolver: Send + Sync + Debug {
    /// Looks up `family`.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the family is unknown, which leaves the declaration
    /// untouched.
    async fn resolve(
        &self,
        family: &str,
        options: &ResolveOptions,
    ) -> Result<Option<ResolvedFontFamily>, ResolveError>;

    /// Returns a human-readable name for this resolver (for logging/debugging).
    fn name(&self) -> &'static str;
}

/// A resolver backed by families registered up front.
///
/// Lookups ignore ASCII case. When neither the registration nor the author
/// lists any fallbacks, the fallbacks configured for the declaration's generic
/// family are used.
#[derive(Debug, Default)]
pub struct InMemoryFontResolver {
    families: RwLock<HashMap<String, ResolvedFontFamily>>,
    generic_fallbacks: HashMap<GenericFamily, Vec<String>>,
}

impl InMemoryFontResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `fallbacks` for declarations ending in `generic`.
    pub fn with_generic_fallbacks<I, S>(mut self, generic: GenericFamily, fallbacks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.generic_fallbacks
            .insert(generic, fallbacks.into_iter().map(Into::into).collect());
        self
    }

    /// Seeds the per-generic fallbacks with [`GenericFamily::default_fallbacks`].
    pub fn with_default_generic_fallbacks(mut self) -> Self {
        for generic in GenericFamily::ALL {
            let defaults = generic.default_fallbacks();
            if !defaults.is_empty() {
                self = self.with_generic_fallbacks(generic, defaults.iter().copied());
            }
        }
        self
    }

    /// Registers (or replaces) a family.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::Backend` if the internal lock is poisoned.
    pub fn register(&self, family: impl Into<String>, resolved: ResolvedFontFamily) -> Result<(), ResolveError> {
        let family = family.into();
        let mut families = self.families.write().map_err(|_| ResolveError::Backend {
            family: family.clone(),
            message: "font table lock poisoned".to_string(),
        })?;
        families.insert(family.to_ascii_lowercase(), resolved);
        Ok(())
    }

    /// Returns 0 if the lock is poisoned.
    pub fn len(&self) -> usize {
        self.families.read().map(|f| f.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn fallbacks_for(&self, registered: &[String], options: &ResolveOptions) -> Vec<String> {
        if !registered.is_empty() {
            return registered.to_vec();
        }
        if !options.fallbacks.is_empty() {
            return options.fallbacks.clone();
        }
        options
            .generic
            .and_then(|generic| self.generic_fallbacks.get(&generic))
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl FontResolver for InMemoryFontResolver {
    async fn resolve(
        &self,
        family: &str,
        options: &ResolveOptions,
    ) -> Result<Option<ResolvedFontFamily>, ResolveError> {
        let families = self.families.read().map_err(|_| ResolveError::Backend {
            family: family.to_string(),
            message: "font table lock poisoned".to_string(),
        })?;
        let Some(entry) = families.get(&family.to_ascii_lowercase()) else {
            return Ok(None);
        };
        let mut resolved = entry.clone();
        resolved.fallbacks = self.fallbacks_for(&entry.fallbacks, options);
        Ok(Some(resolved))
    }

    fn name(&self) -> &'static str {
        "InMemoryFontResolver"
    }
}
