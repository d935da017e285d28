use log::debug;

use super::filters::SearchFilters;
use crate::catalog::{Catalog, ColorEntry};

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn matches_term(entry: &ColorEntry, needle_lower: &str) -> bool {
    entry
        .name()
        .is_some_and(|name| contains_ignore_case(name, needle_lower))
        || contains_ignore_case(entry.hex(), needle_lower)
        || entry
            .family()
            .is_some_and(|family| contains_ignore_case(family, needle_lower))
        || entry
            .tags()
            .iter()
            .any(|tag| contains_ignore_case(tag, needle_lower))
}

/// Catalog positions of the entries that pass `search_term` and `filters`,
/// in catalog order.
pub fn evaluate_indices(
    catalog: &Catalog,
    search_term: &str,
    filters: &SearchFilters,
) -> Vec<usize> {
    let needle = search_term.to_lowercase();
    let indices: Vec<usize> = catalog
        .iter()
        .enumerate()
        .filter(|(_, entry)| needle.is_empty() || matches_term(entry, &needle))
        .filter(|(_, entry)| filters.matches(entry))
        .map(|(idx, _)| idx)
        .collect();
    debug!(
        "evaluated term {search_term:?} with {filters:?}: {} of {} entries",
        indices.len(),
        catalog.len()
    );
    indices
}

/// Filter the catalog by free text and attributes.
///
/// The term matches case-insensitively as a substring of the name, hex,
/// family, or any tag. An empty term keeps every entry. Output keeps catalog
/// order and depends only on the three inputs.
pub fn evaluate<'a>(
    catalog: &'a Catalog,
    search_term: &str,
    filters: &SearchFilters,
) -> Vec<&'a ColorEntry> {
    evaluate_indices(catalog, search_term, filters)
        .into_iter()
        .filter_map(|idx| catalog.get(idx))
        .collect()
}

/// Distinct non-empty families across the whole catalog, first occurrence first.
pub fn available_families(catalog: &Catalog) -> Vec<&str> {
    let mut families: Vec<&str> = Vec::new();
    for family in catalog.iter().filter_map(ColorEntry::family) {
        if !family.is_empty() && !families.contains(&family) {
            families.push(family);
        }
    }
    families
}
