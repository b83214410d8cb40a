//! Filter engine handle
//!
//! `FilterEngine` owns the state evaluation needs (currently only the regex
//! cache). The operator, column, global and table predicates are implemented
//! on it in their own modules.

use std::sync::{Arc, OnceLock};

use crate::regex_cache::RegexCache;
use crate::settings::FilterSettings;

#[derive(Debug, Clone)]
pub struct FilterEngine {
    pub(crate) cache: Arc<RegexCache>,
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterEngine {
    /// Engine with a private cache of the default size
    pub fn new() -> Self {
        Self::with_cache(Arc::new(RegexCache::new()))
    }

    /// Engine over an existing cache
    pub fn with_cache(cache: Arc<RegexCache>) -> Self {
        Self { cache }
    }

    /// Engine with a private cache sized from settings
    pub fn from_settings(settings: &FilterSettings) -> Self {
        Self::with_cache(Arc::new(RegexCache::with_capacity(
            settings.regex_cache_capacity,
        )))
    }

    /// Process-wide engine over `RegexCache::global`
    pub fn shared() -> &'static FilterEngine {
        static SHARED: OnceLock<FilterEngine> = OnceLock::new();
        SHARED.get_or_init(|| Self::with_cache(RegexCache::global()))
    }

    pub fn regex_cache(&self) -> &RegexCache {
        &self.cache
    }
}
