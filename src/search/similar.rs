use log::debug;
use std::collections::HashMap;

use crate::catalog::{Catalog, ColorEntry};
use crate::color::{PARALLEL_THRESHOLD, Rgb, find_nearest_colors_with_threshold, hex_to_rgb};

/// A catalog entry paired with its distance to the query color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult<'a> {
    pub entry: &'a ColorEntry,
    pub distance: f64,
}

/// Up to `k` catalog entries closest to `target_hex`, nearest first.
///
/// Invalid hex or `k == 0` gives an empty result.
pub fn nearest_entries<'a>(
    catalog: &'a Catalog,
    target_hex: &str,
    k: usize,
) -> Vec<MatchResult<'a>> {
    nearest_entries_with_threshold(catalog, target_hex, k, PARALLEL_THRESHOLD)
}

pub fn nearest_entries_with_threshold<'a>(
    catalog: &'a Catalog,
    target_hex: &str,
    k: usize,
    parallel_threshold: usize,
) -> Vec<MatchResult<'a>> {
    if k == 0 {
        return Vec::new();
    }
    let Some(target) = hex_to_rgb(target_hex) else {
        debug!("similar-color query {target_hex:?} is not a hex color");
        return Vec::new();
    };

    // Entries that fail to decode cannot be ranked and are dropped.
    let decoded: Vec<(Rgb, &ColorEntry)> = catalog
        .iter()
        .filter_map(|entry| entry.rgb().map(|rgb| (rgb, entry)))
        .collect();
    let candidates: Vec<Rgb> = decoded.iter().map(|(rgb, _)| *rgb).collect();

    // Reverse lookup resolves a shared RGB to its first catalog entry.
    let mut first_by_rgb: HashMap<Rgb, &ColorEntry> = HashMap::with_capacity(decoded.len());
    for &(rgb, entry) in &decoded {
        first_by_rgb.entry(rgb).or_insert(entry);
    }

    find_nearest_colors_with_threshold(target, &candidates, parallel_threshold)
        .into_iter()
        .take(k)
        .filter_map(|nearest| {
            first_by_rgb.get(&nearest.color).map(|&entry| MatchResult {
                entry,
                distance: nearest.distance,
            })
        })
        .collect()
}
