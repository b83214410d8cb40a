//! Compiled regex cache for substring filters
//!
//! Filtering runs once per row on every keystroke, and a search box produces
//! the same escaped pattern for every row of a scan. Compiled patterns are kept
//! in a small bounded cache keyed by `pattern:flags`.
//!
//! Eviction is insertion ordered: when the cache is full the entry inserted
//! first is dropped. Lookups do not refresh an entry's position.

use indexmap::IndexMap;
use parking_lot::Mutex;
use regex::{Regex, RegexBuilder};
use std::sync::{Arc, OnceLock};

/// Default number of compiled patterns to keep
pub const DEFAULT_CAPACITY: usize = 100;

/// A cached compilation result
#[derive(Debug, Clone)]
pub enum CachedRegex {
    /// Successfully compiled pattern
    Compiled(Regex),
    /// Stand-in for a pattern that failed to compile. Matches nothing.
    NeverMatches,
}

impl CachedRegex {
    #[inline]
    pub fn is_match(&self, text: &str) -> bool {
        match self {
            CachedRegex::Compiled(re) => re.is_match(text),
            CachedRegex::NeverMatches => false,
        }
    }

    /// True when this entry stands in for a failed compilation
    pub fn is_fallback(&self) -> bool {
        matches!(self, CachedRegex::NeverMatches)
    }
}

/// Bounded, thread-safe cache of compiled patterns
#[derive(Debug)]
pub struct RegexCache {
    capacity: usize,
    entries: Mutex<IndexMap<String, CachedRegex>>,
}

impl Default for RegexCache {
    fn default() -> Self {
        Self::new()
    }
}

impl RegexCache {
    /// Create a cache holding up to `DEFAULT_CAPACITY` patterns
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a cache with a custom bound (at least one entry)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: Mutex::new(IndexMap::with_capacity(capacity)),
        }
    }

    /// Process-wide cache used by `FilterEngine::shared`
    pub fn global() -> Arc<RegexCache> {
        static GLOBAL: OnceLock<Arc<RegexCache>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(RegexCache::new())).clone()
    }

    /// Return the compiled form of `pattern` with JavaScript-style `flags`,
    /// compiling and caching it on a miss.
    ///
    /// Never fails: a pattern that does not compile is cached as
    /// `CachedRegex::NeverMatches`.
    pub fn get_or_compile(&self, pattern: &str, flags: &str) -> CachedRegex {
        let key = cache_key(pattern, flags);
        let mut entries = self.entries.lock();

        if let Some(hit) = entries.get(&key) {
            return hit.clone();
        }

        if entries.len() >= self.capacity {
            if let Some((evicted, _)) = entries.shift_remove_index(0) {
                tracing::debug!(key = %evicted, capacity = self.capacity, "Evicted oldest regex cache entry");
            }
        }

        let compiled = compile(pattern, flags);
        entries.insert(key, compiled.clone());
        compiled
    }

    /// Whether a compiled form of `pattern`/`flags` is currently cached
    pub fn contains(&self, pattern: &str, flags: &str) -> bool {
        self.entries.lock().contains_key(&cache_key(pattern, flags))
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

fn cache_key(pattern: &str, flags: &str) -> String {
    format!("{}:{}", pattern, flags)
}

fn compile(pattern: &str, flags: &str) -> CachedRegex {
    let mut builder = RegexBuilder::new(pattern);
    for flag in flags.chars() {
        match flag {
            'i' => {
                builder.case_insensitive(true);
            }
            'm' => {
                builder.multi_line(true);
            }
            's' => {
                builder.dot_matches_new_line(true);
            }
            'u' => {
                builder.unicode(true);
            }
            // Global, sticky and indices change iteration, not matching
            'g' | 'y' | 'd' => {}
            other => {
                tracing::warn!(pattern, flag = %other, "Unsupported regex flag, pattern will match nothing");
                return CachedRegex::NeverMatches;
            }
        }
    }

    match builder.build() {
        Ok(re) => CachedRegex::Compiled(re),
        Err(err) => {
            tracing::warn!(pattern, error = %err, "Failed to compile filter pattern, pattern will match nothing");
            CachedRegex::NeverMatches
        }
    }
}
