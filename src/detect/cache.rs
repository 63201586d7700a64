//! Bounded memo table for multi-type detection results.

use ahash::AHashMap;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::VecDeque;

pub const DEFAULT_CACHE_SIZE: usize = 512;

#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    pub max_size: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_CACHE_SIZE,
        }
    }
}

/// Counters exposed for observability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
    pub max_size: usize,
}

impl CacheStats {
    /// Fraction of lookups answered from the cache, `0.0` before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Insertion-ordered cache of detection results keyed by normalized input.
///
/// Values are pattern indices into the registry of the detector that produced
/// them, so one cache must only be shared between detectors built over the same
/// registry. Once `max_size` is exceeded the oldest entries are evicted.
pub struct PatternCache {
    cfg: CacheConfig,
    inner: Mutex<Inner>,
}

struct Inner {
    map: AHashMap<String, Vec<usize>>,
    order: VecDeque<String>,
    hits: u64,
    misses: u64,
}

impl PatternCache {
    pub fn new(cfg: CacheConfig) -> Self {
        Self {
            cfg,
            inner: Mutex::new(Inner {
                map: AHashMap::new(),
                order: VecDeque::new(),
                hits: 0,
                misses: 0,
            }),
        }
    }

    pub fn with_max_size(max_size: usize) -> Self {
        Self::new(CacheConfig { max_size })
    }

    /// Looks up `key`, counting the lookup as a hit or a miss.
    pub fn get(&self, key: &str) -> Option<Vec<usize>> {
        let mut inner = self.inner.lock();
        match inner.map.get(key).cloned() {
            Some(found) => {
                inner.hits += 1;
                Some(found)
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    pub fn insert(&self, key: String, value: Vec<usize>) {
        let mut inner = self.inner.lock();
        if inner.map.insert(key.clone(), value).is_none() {
            inner.order.push_back(key);
        }

        while inner.map.len() > self.cfg.max_size {
            match inner.order.pop_front() {
                Some(oldest) => {
                    inner.map.remove(&oldest);
                }
                None => break,
            }
        }
    }

    /// Drops every entry and resets the hit/miss counters.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.map.clear();
        inner.order.clear();
        inner.hits = 0;
        inner.misses = 0;
    }

    pub fn len(&self) -> usize {
        self.inner.lock().map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        CacheStats {
            hits: inner.hits,
            misses: inner.misses,
            size: inner.map.len(),
            max_size: self.cfg.max_size,
        }
    }
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}

impl std::fmt::Debug for PatternCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternCache")
            .field("stats", &self.stats())
            .finish()
    }
}
