use log::debug;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

use super::evaluate::evaluate_indices;
use super::filters::SearchFilters;
use crate::catalog::Catalog;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct QueryKey {
    search_term: String,
    filters: SearchFilters,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub len: usize,
}

/// LRU memo of [`evaluate_indices`] over one catalog, keyed by term and filters.
///
/// The cache owns a handle to its catalog, so cached indices always refer to
/// the entries they were computed from. Catalogs with equal fingerprints never
/// share slots.
#[derive(Debug)]
pub struct ResultCache {
    catalog: Arc<Catalog>,
    entries: LruCache<QueryKey, Arc<[usize]>>,
    hits: u64,
    misses: u64,
}

impl ResultCache {
    pub const DEFAULT_CAPACITY: usize = 64;

    /// A capacity of zero is treated as one.
    pub fn new(catalog: Arc<Catalog>, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            catalog,
            entries: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    pub const fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn get_or_evaluate(&mut self, search_term: &str, filters: &SearchFilters) -> Arc<[usize]> {
        let key = QueryKey {
            search_term: search_term.to_string(),
            filters: filters.clone(),
        };
        if let Some(hit) = self.entries.get(&key) {
            self.hits += 1;
            return Arc::clone(hit);
        }
        self.misses += 1;
        let computed: Arc<[usize]> = evaluate_indices(&self.catalog, search_term, filters).into();
        if let Some((evicted, _)) = self.entries.push(key, Arc::clone(&computed)) {
            debug!("result cache evicted term {:?}", evicted.search_term);
        }
        computed
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            len: self.entries.len(),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
