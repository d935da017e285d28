use std::cell::RefCell;
use std::sync::Arc;

use super::cache::{CacheStats, ResultCache};
use super::evaluate::available_families;
use super::filters::SearchFilters;
use super::similar::{MatchResult, nearest_entries_with_threshold};
use crate::catalog::{Catalog, ColorEntry};
use crate::color::PARALLEL_THRESHOLD;

/// Query state over one injected catalog.
///
/// Setters only replace state; every read recomputes from
/// `(catalog, search_term, filters)` through the result cache.
#[derive(Debug)]
pub struct SearchEngine {
    catalog: Arc<Catalog>,
    search_term: String,
    filters: SearchFilters,
    cache: RefCell<ResultCache>,
    parallel_threshold: usize,
}

impl SearchEngine {
    pub const DEFAULT_SIMILAR_COUNT: usize = 3;

    pub fn new(catalog: Arc<Catalog>) -> Self {
        let cache = ResultCache::new(Arc::clone(&catalog), ResultCache::DEFAULT_CAPACITY);
        Self {
            catalog,
            search_term: String::new(),
            filters: SearchFilters::default(),
            cache: RefCell::new(cache),
            parallel_threshold: PARALLEL_THRESHOLD,
        }
    }

    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache = RefCell::new(ResultCache::new(Arc::clone(&self.catalog), capacity));
        self
    }

    #[must_use]
    pub const fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    pub const fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub const fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    pub fn set_search_term(&mut self, search_term: impl Into<String>) {
        self.search_term = search_term.into();
    }

    pub fn set_filters(&mut self, filters: SearchFilters) {
        self.filters = filters;
    }

    /// Back to the empty term and no filters.
    pub fn reset(&mut self) {
        self.search_term.clear();
        self.filters = SearchFilters::default();
    }

    /// Entries passing the current term and filters, in catalog order.
    pub fn results(&self) -> Vec<&ColorEntry> {
        let indices = self
            .cache
            .borrow_mut()
            .get_or_evaluate(&self.search_term, &self.filters);
        indices
            .iter()
            .filter_map(|&idx| self.catalog.get(idx))
            .collect()
    }

    pub fn available_families(&self) -> Vec<&str> {
        available_families(&self.catalog)
    }

    /// Nearest `k` entries to `target_hex`; empty when the hex is invalid.
    ///
    /// Ignores the current term and filters.
    pub fn find_similar_colors(&self, target_hex: &str, k: usize) -> Vec<&ColorEntry> {
        self.similar_matches(target_hex, k)
            .into_iter()
            .map(|m| m.entry)
            .collect()
    }

    pub fn similar_matches(&self, target_hex: &str, k: usize) -> Vec<MatchResult<'_>> {
        nearest_entries_with_threshold(&self.catalog, target_hex, k, self.parallel_threshold)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.borrow().stats()
    }
}
