//! Free text to component types and command intent.

use std::sync::Arc;

mod cache;
mod command;
mod pattern;

pub use cache::{CacheConfig, CacheStats, DEFAULT_CACHE_SIZE, PatternCache};
pub use command::{CommandType, detect_command_type};
pub use pattern::{Pattern, PatternRegistry, normalize};

use pattern::keyword_positions;

/// Matches free text against a pattern registry.
///
/// The detector is cheap to share: the registry is immutable after `build()` and the
/// cache is an injected `Arc<PatternCache>` with its own lock.
#[derive(Debug)]
pub struct PatternDetector {
    registry: PatternRegistry,
    cache: Arc<PatternCache>,
}

pub struct PatternDetectorBuilder {
    registry: PatternRegistry,
    cache: Option<Arc<PatternCache>>,
}

impl PatternDetectorBuilder {
    pub fn new() -> Self {
        Self {
            registry: PatternRegistry::from_catalog(),
            cache: None,
        }
    }

    /// Adds a pattern after the catalog entries, or replaces the entry of the same type.
    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.registry.push(pattern);
        self
    }

    /// Starts from an explicit registry instead of the catalog.
    pub fn with_registry(mut self, registry: PatternRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_cache(mut self, cache: Arc<PatternCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn build(self) -> PatternDetector {
        PatternDetector {
            registry: self.registry,
            cache: self.cache.unwrap_or_default(),
        }
    }
}

impl Default for PatternDetectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternDetector {
    /// A detector over the built-in catalog with a private default-sized cache.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> PatternDetectorBuilder {
        PatternDetectorBuilder::new()
    }

    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    pub fn patterns(&self) -> &[Pattern] {
        self.registry.patterns()
    }

    pub fn cache(&self) -> &Arc<PatternCache> {
        &self.cache
    }

    /// Returns the highest-priority type mentioned in `text`.
    ///
    /// Always one of the types [`detect_all_node_types`](Self::detect_all_node_types)
    /// reports: the earliest registry entry among them.
    pub fn detect_node_type(&self, text: &str) -> Option<&Pattern> {
        let normalized = normalize(text);
        self.scan(&normalized)
            .into_iter()
            .min()
            .and_then(|idx| self.registry.get(idx))
    }

    /// Returns every distinct type mentioned in `text`, ordered by first mention.
    ///
    /// A keyword hit lying entirely inside a longer hit of another type is not a
    /// separate mention: "웹방화벽" yields `waf` only, not `waf` and `firewall`.
    pub fn detect_all_node_types(&self, text: &str) -> Vec<&Pattern> {
        let normalized = normalize(text);
        self.resolve(self.scan(&normalized))
    }

    /// Memoized [`detect_all_node_types`](Self::detect_all_node_types). Always returns
    /// the same types in the same order as the uncached call.
    pub fn detect_all_node_types_cached(&self, text: &str) -> Vec<&Pattern> {
        let normalized = normalize(text);
        if let Some(indices) = self.cache.get(&normalized) {
            tracing::debug!(input = %normalized, "pattern cache hit");
            return self.resolve(indices);
        }

        let indices = self.scan(&normalized);
        tracing::debug!(input = %normalized, matches = indices.len(), "pattern cache miss");
        self.cache.insert(normalized, indices.clone());
        self.resolve(indices)
    }

    pub fn detect_command_type(&self, text: &str) -> CommandType {
        detect_command_type(text)
    }

    fn resolve(&self, indices: Vec<usize>) -> Vec<&Pattern> {
        indices
            .into_iter()
            .filter_map(|idx| self.registry.get(idx))
            .collect()
    }

    /// Registry indices of the types mentioned in `normalized`, in mention order.
    fn scan(&self, normalized: &str) -> Vec<usize> {
        if !self.registry.might_match(normalized) {
            return Vec::new();
        }

        // (start, end, pattern index) of every keyword occurrence
        let mut hits: Vec<(usize, usize, usize)> = Vec::new();
        for (idx, pattern) in self.registry.patterns().iter().enumerate() {
            for keyword in &pattern.keywords {
                hits.extend(
                    keyword_positions(normalized, keyword).map(|(start, end)| (start, end, idx)),
                );
            }
        }

        // Earliest first; at the same start the longer keyword wins, then registry order.
        hits.sort_by(|a, b| {
            a.0.cmp(&b.0)
                .then_with(|| (b.1 - b.0).cmp(&(a.1 - a.0)))
                .then_with(|| a.2.cmp(&b.2))
        });

        let mut claimed: Vec<(usize, usize, usize)> = Vec::new();
        let mut order: Vec<usize> = Vec::new();
        for hit in hits {
            let (start, end, idx) = hit;
            let shadowed = claimed
                .iter()
                .any(|&(s, e, other)| other != idx && s <= start && end <= e);
            if shadowed {
                continue;
            }
            claimed.push(hit);
            if !order.contains(&idx) {
                order.push(idx);
            }
        }
        order
    }
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new()
    }
}
