//! Memoized UTF-8 key string to base64 conversion
//!
//! Entries are keyed by the SHA-256 of the key string so the map never holds
//! the raw key as a lookup key. Cached values are wiped on drop.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

use sha2::{Digest, Sha256};
use tracing::debug;
use zeroize::Zeroizing;

use crate::encoding::to_base64;

type CacheKey = [u8; 32];

/// Key string to base64 encoder with a per-instance cache
#[derive(Default)]
pub struct KeyEncoder {
    entries: RwLock<HashMap<CacheKey, Zeroizing<String>>>,
    /// Upper bound on cached entries; `None` grows without limit
    max_entries: Option<usize>,
    conversions: AtomicU64,
}

impl KeyEncoder {
    /// Create an unbounded encoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an encoder that caches at most `max_entries` distinct keys.
    /// Keys past the bound are still encoded, just not remembered.
    pub fn with_max_entries(max_entries: Option<usize>) -> Self {
        Self {
            max_entries,
            ..Self::default()
        }
    }

    /// Return the base64 encoding of `key`'s UTF-8 bytes
    pub fn encode(&self, key: &str) -> String {
        let id = Self::cache_key(key);

        if let Some(hit) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
        {
            return hit.to_string();
        }

        // Racing writers compute the same value, so a lost race is harmless
        let encoded = to_base64(key.as_bytes());
        self.conversions.fetch_add(1, Ordering::Relaxed);

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let full = self
            .max_entries
            .is_some_and(|max| entries.len() >= max && !entries.contains_key(&id));
        if full {
            debug!(cached = entries.len(), "key cache full, not caching");
        } else {
            entries
                .entry(id)
                .or_insert_with(|| Zeroizing::new(encoded.clone()));
        }

        encoded
    }

    /// Number of distinct keys currently cached
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of times a key was actually converted (cache misses)
    pub fn conversions(&self) -> u64 {
        self.conversions.load(Ordering::Relaxed)
    }

    /// Drop every cached entry
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn cache_key(key: &str) -> CacheKey {
        Sha256::digest(key.as_bytes()).into()
    }
}

impl std::fmt::Debug for KeyEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyEncoder")
            .field("entries", &self.len())
            .field("max_entries", &self.max_entries)
            .field("conversions", &self.conversions())
            .finish()
    }
}
