mod cache;
mod engine;
mod evaluate;
mod filters;
mod similar;

pub use cache::{CacheStats, ResultCache};
pub use engine::SearchEngine;
pub use evaluate::{available_families, evaluate, evaluate_indices};
pub use filters::SearchFilters;
pub use similar::{MatchResult, nearest_entries, nearest_entries_with_threshold};
