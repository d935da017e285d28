use anyhow::Context as _;
use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::model::{Catalog, CatalogWarning, ColorEntry};
use crate::color::channels_to_hex;

/// Separator between tags inside a single CSV cell.
const CSV_TAG_SEPARATOR: char = ';';

/// On-disk catalog encodings, picked by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Toml,
    Json,
    Csv,
}

impl CatalogFormat {
    pub const ALL: [Self; 3] = [Self::Toml, Self::Json, Self::Csv];

    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        Self::ALL.into_iter().find(|format| format.extension() == ext)
    }

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// Result of loading one catalog source.
#[derive(Debug)]
pub struct CatalogLoadOutcome {
    pub catalog: Catalog,
    /// Rows that were skipped.
    pub warnings: Vec<CatalogWarning>,
    pub format: CatalogFormat,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EntryRecord {
    hex: Option<String>,
    rgb: Option<Vec<i64>>,
    name: Option<String>,
    family: Option<String>,
    tags: Vec<String>,
}

impl EntryRecord {
    fn into_entry(self, row: usize) -> Result<ColorEntry, CatalogWarning> {
        let hex = match (self.hex, self.rgb) {
            (Some(hex), _) if !hex.trim().is_empty() => hex,
            (_, Some(channels)) => channels_to_hex(
                channels.first().copied(),
                channels.get(1).copied(),
                channels.get(2).copied(),
            ),
            _ => return Err(CatalogWarning::MissingColor { row }),
        };
        let entry = ColorEntry::new(hex.trim())
            .ok_or(CatalogWarning::InvalidHex { row, value: hex })?
            .with_tags(self.tags);
        let entry = match self.name {
            Some(name) => entry.with_name(name),
            None => entry,
        };
        Ok(match self.family {
            Some(family) => entry.with_family(family),
            None => entry,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogDocument {
    key: Option<String>,
    #[serde(alias = "entries")]
    colors: Vec<EntryRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonCatalog {
    Entries(Vec<EntryRecord>),
    Document(CatalogDocument),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvRecord {
    hex: Option<String>,
    r: Option<i64>,
    g: Option<i64>,
    b: Option<i64>,
    name: Option<String>,
    family: Option<String>,
    tags: Option<String>,
}

impl From<CsvRecord> for EntryRecord {
    fn from(record: CsvRecord) -> Self {
        let has_channels = record.r.is_some() || record.g.is_some() || record.b.is_some();
        let rgb = has_channels.then(|| {
            // A partially filled triple falls back to black in `channels_to_hex`.
            [record.r, record.g, record.b].into_iter().map_while(|c| c).collect()
        });
        let tags = record
            .tags
            .as_deref()
            .unwrap_or_default()
            .split(CSV_TAG_SEPARATOR)
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            hex: record.hex,
            rgb,
            name: record.name,
            family: record.family,
            tags,
        }
    }
}

fn read_csv_records(text: &str) -> anyhow::Result<Vec<EntryRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());
    let mut records = Vec::new();
    for (idx, row) in reader.deserialize::<CsvRecord>().enumerate() {
        let record = row.with_context(|| format!("Failed to read CSV catalog row {}", idx + 1))?;
        records.push(record.into());
    }
    Ok(records)
}

/// Parse catalog text. `default_key` applies when the source names no key.
pub fn parse_catalog(
    text: &str,
    format: CatalogFormat,
    default_key: Option<&str>,
) -> anyhow::Result<CatalogLoadOutcome> {
    let (key, records) = match format {
        CatalogFormat::Toml => {
            let doc: CatalogDocument =
                toml::from_str(text).context("Failed to parse TOML catalog")?;
            (doc.key, doc.colors)
        }
        CatalogFormat::Json => {
            let parsed: JsonCatalog =
                serde_json::from_str(text).context("Failed to parse JSON catalog")?;
            match parsed {
                JsonCatalog::Entries(records) => (None, records),
                JsonCatalog::Document(doc) => (doc.key, doc.colors),
            }
        }
        CatalogFormat::Csv => (None, read_csv_records(text)?),
    };

    let mut entries = Vec::with_capacity(records.len());
    let mut warnings = Vec::new();
    for (idx, record) in records.into_iter().enumerate() {
        match record.into_entry(idx + 1) {
            Ok(entry) => entries.push(entry),
            Err(warning) => {
                warn!("catalog {}: {warning}", default_key.unwrap_or("<inline>"));
                warnings.push(warning);
            }
        }
    }

    let catalog = match key.as_deref().or(default_key) {
        Some(key) => Catalog::with_key(key, entries),
        None => Catalog::new(entries),
    };
    info!(
        "loaded {} catalog {:?}: {} entries, {} skipped, fingerprint {:08x}",
        format.extension(),
        catalog.key().unwrap_or_default(),
        catalog.len(),
        warnings.len(),
        catalog.fingerprint()
    );
    Ok(CatalogLoadOutcome {
        catalog,
        warnings,
        format,
    })
}

/// Load a catalog file; the file stem is the fallback catalog key.
pub fn load_catalog(path: &Path) -> anyhow::Result<CatalogLoadOutcome> {
    let format = CatalogFormat::from_path(path).with_context(|| {
        format!(
            "Unsupported catalog file {}: expected .toml, .json or .csv",
            path.display()
        )
    })?;
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;
    let stem = path.file_stem().and_then(|stem| stem.to_str());
    parse_catalog(&text, format, stem)
        .with_context(|| format!("Invalid catalog {}", path.display()))
}
