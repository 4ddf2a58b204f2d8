//! Build-wide record of font URLs that should be preloaded per asset.

use std::collections::{BTreeSet, HashMap};
use std::sync::{PoisonError, RwLock};

/// Maps asset ids to the font URLs they should preload.
///
/// Shared by every rewrite in a build session. All writes are set unions, so
/// concurrent rewrites may record in any order. A poisoned lock is recovered
/// rather than reported, since no write can leave a set half-updated.
#[derive(Debug, Default)]
pub struct PreloadRegistry {
    entries: RwLock<HashMap<String, BTreeSet<String>>>,
}

impl PreloadRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `url` to the set for `asset_id`.
    pub fn record(&self, asset_id: &str, url: &str) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries
            .entry(asset_id.to_string())
            .or_default()
            .insert(url.to_string());
    }

    /// Unions the sets of `sources` into the set for `target`.
    ///
    /// Source entries are kept. Returns the number of URLs newly added to `target`.
    pub fn merge_into<'s, I>(&self, target: &str, sources: I) -> usize
    where
        I: IntoIterator<Item = &'s str>,
    {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let mut merged = BTreeSet::new();
        for source in sources {
            if source == target {
                continue;
            }
            if let Some(urls) = entries.get(source) {
                merged.extend(urls.iter().cloned());
            }
        }
        if merged.is_empty() {
            return 0;
        }
        let entry = entries.entry(target.to_string()).or_default();
        let before = entry.len();
        entry.extend(merged);
        entry.len() - before
    }

    /// The URLs recorded for `asset_id`, sorted.
    pub fn urls_for(&self, asset_id: &str) -> Vec<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(asset_id)
            .map(|urls| urls.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn snapshot(&self) -> HashMap<String, BTreeSet<String>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).is_empty()
    }
}
