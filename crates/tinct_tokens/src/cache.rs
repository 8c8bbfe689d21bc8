//! Per-source memo of resolution results

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::engine::Resolution;
use crate::registry::SourceRegistry;

/// Hit/miss counters, mostly for tests and diagnostics
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Entries actually removed by invalidation
    pub evictions: u64,
}

#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: FxHashMap<String, Arc<Resolution>>,
    stats: CacheStats,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an entry, counting the hit or miss.
    pub fn get(&mut self, id: &str) -> Option<Arc<Resolution>> {
        match self.entries.get(id) {
            Some(entry) => {
                self.stats.hits += 1;
                Some(Arc::clone(entry))
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, id: impl Into<String>, resolution: Arc<Resolution>) {
        self.entries.insert(id.into(), resolution);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn clear(&mut self) {
        self.stats.evictions += self.entries.len() as u64;
        self.entries.clear();
    }

    /// Drop the entry for `id` and, transitively, for every registered source
    /// that extends it.
    ///
    /// Returns every id visited, `id` first, whether or not it had an entry.
    pub fn invalidate(&mut self, id: &str, registry: &SourceRegistry) -> Vec<String> {
        let mut visited = Vec::new();
        let mut seen = FxHashSet::default();
        let mut stack = vec![id.to_string()];

        while let Some(current) = stack.pop() {
            if !seen.insert(current.clone()) {
                continue;
            }
            if self.entries.remove(&current).is_some() {
                self.stats.evictions += 1;
            }
            stack.extend(registry.children_of(&current).map(str::to_string));
            visited.push(current);
        }

        visited
    }
}
