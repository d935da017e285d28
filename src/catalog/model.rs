use serde::Serialize;
use std::fmt;

use super::checksum::compute_catalog_crc32;
use crate::color::{Rgb, hex_to_rgb, rgb_to_hex};

/// One named reference color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorEntry {
    /// Normalized `#RRGGBB`, always decodable.
    hex: String,
    name: Option<String>,
    family: Option<String>,
    /// Unique labels in first-seen order.
    tags: Vec<String>,
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

impl ColorEntry {
    /// Build an entry from any hex text [`hex_to_rgb`] accepts.
    ///
    /// Returns `None` when the hex does not decode.
    pub fn new(hex: &str) -> Option<Self> {
        hex_to_rgb(hex).map(Self::from_rgb)
    }

    pub fn from_rgb(rgb: Rgb) -> Self {
        Self {
            hex: rgb_to_hex(rgb),
            name: None,
            family: None,
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = non_empty(&name.into());
        self
    }

    #[must_use]
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = non_empty(&family.into());
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for tag in tags {
            let tag = tag.into();
            if !tag.is_empty() && !self.tags.contains(&tag) {
                self.tags.push(tag);
            }
        }
        self
    }

    pub fn hex(&self) -> &str {
        &self.hex
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn family(&self) -> Option<&str> {
        self.family.as_deref()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Decoded color. Always `Some` for entries built through this type.
    pub fn rgb(&self) -> Option<Rgb> {
        hex_to_rgb(&self.hex)
    }

    /// Name if present, otherwise the hex code.
    pub fn label(&self) -> &str {
        self.name().unwrap_or(&self.hex)
    }
}

/// Ordered, immutable set of reference colors.
///
/// Built once by a loader and shared read-only (usually behind an `Arc`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    key: Option<String>,
    entries: Vec<ColorEntry>,
    fingerprint: u32,
}

impl Catalog {
    pub fn new(entries: Vec<ColorEntry>) -> Self {
        let fingerprint = compute_catalog_crc32(&entries);
        Self {
            key: None,
            entries,
            fingerprint,
        }
    }

    pub fn with_key(key: impl Into<String>, entries: Vec<ColorEntry>) -> Self {
        Self {
            key: non_empty(&key.into()),
            ..Self::new(entries)
        }
    }

    /// Catalog key (e.g. the product table this catalog describes).
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn entries(&self) -> &[ColorEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&ColorEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ColorEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// CRC32 over the entries; equal contents give equal fingerprints.
    pub const fn fingerprint(&self) -> u32 {
        self.fingerprint
    }
}

impl FromIterator<ColorEntry> for Catalog {
    fn from_iter<I: IntoIterator<Item = ColorEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ColorEntry;
    type IntoIter = std::slice::Iter<'a, ColorEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Row-level problems found while loading; the row is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogWarning {
    InvalidHex {
        /// 1-based row within the source.
        row: usize,
        /// Hex text as written in the source.
        value: String,
    },
    MissingColor {
        /// 1-based row within the source.
        row: usize,
    },
}

impl fmt::Display for CatalogWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHex { row, value } => {
                write!(f, "row {row}: {value:?} is not a hex color, skipped")
            }
            Self::MissingColor { row } => write!(f, "row {row}: no hex or rgb value, skipped"),
        }
    }
}
