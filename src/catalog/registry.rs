use anyhow::{Context as _, bail};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::io::{CatalogFormat, load_catalog};
use super::model::Catalog;

/// Catalogs addressed by catalog key.
#[derive(Debug, Clone, Default)]
pub struct CatalogRegistry {
    catalogs: BTreeMap<String, Arc<Catalog>>,
}

impl CatalogRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a catalog, returning any catalog previously stored under `key`.
    pub fn insert(&mut self, key: impl Into<String>, catalog: Catalog) -> Option<Arc<Catalog>> {
        self.catalogs.insert(key.into(), Arc::new(catalog))
    }

    pub fn get(&self, key: &str) -> Option<Arc<Catalog>> {
        self.catalogs.get(key).cloned()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.catalogs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }

    /// Load every `.toml`, `.json` and `.csv` file in `dir`, keyed by file stem.
    ///
    /// Files are visited in name order; when two files share a stem the first
    /// one wins.
    pub fn load_dir(dir: &Path) -> anyhow::Result<Self> {
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)
            .with_context(|| format!("Failed to read catalog directory {}", dir.display()))?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && CatalogFormat::from_path(path).is_some())
            .collect();
        paths.sort();

        let mut registry = Self::new();
        for path in paths {
            let Some(key) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if registry.catalogs.contains_key(key) {
                warn!("duplicate catalog key {key:?}, ignoring {}", path.display());
                continue;
            }
            let key = key.to_string();
            let outcome = load_catalog(&path)?;
            debug!("registered catalog {key:?} from {}", path.display());
            registry.insert(key, outcome.catalog);
        }

        if registry.is_empty() {
            bail!("No catalog files found in {}", dir.display());
        }
        Ok(registry)
    }
}
