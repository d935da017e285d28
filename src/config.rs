use anyhow::Context as _;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::color::PARALLEL_THRESHOLD;
use crate::search::{ResultCache, SearchEngine};

const CONFIG_FILE_NAME: &str = "huefinder.toml";
const CONFIG_ENV_VAR: &str = "HUEFINDER_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Catalog file or directory used when none is given on the command line.
    pub catalog: Option<PathBuf>,
    /// Default number of matches for similar-color lookups.
    pub similar_count: usize,
    pub cache_capacity: usize,
    /// Catalog size above which distances are computed in parallel.
    pub parallel_threshold: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            similar_count: SearchEngine::DEFAULT_SIMILAR_COUNT,
            cache_capacity: ResultCache::DEFAULT_CAPACITY,
            parallel_threshold: PARALLEL_THRESHOLD,
        }
    }
}

impl AppConfig {
    /// First config among the search locations that reads and parses, or defaults.
    pub fn load() -> Self {
        Self::first_valid(search_locations()).map_or_else(Self::default, |(path, cfg)| {
            debug!("using config {}", path.display());
            cfg
        })
    }

    /// Missing files are skipped silently, unparsable ones with a warning.
    fn first_valid<I>(locations: I) -> Option<(PathBuf, Self)>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        locations.into_iter().find_map(|path| {
            let contents = fs::read_to_string(&path).ok()?;
            match Self::from_toml_str(&contents) {
                Ok(cfg) => Some((path, cfg)),
                Err(err) => {
                    warn!("skipping config {}: {err}", path.display());
                    None
                }
            }
        })
    }

    /// Load an explicitly requested config file; unlike [`Self::load`] this fails loudly.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn sanitized(&self) -> Self {
        // Clamp to reasonable operating bounds to avoid pathological configs.
        Self {
            catalog: self.catalog.clone(),
            similar_count: self.similar_count.clamp(1, 256),
            cache_capacity: self.cache_capacity.clamp(1, 4_096),
            parallel_threshold: self.parallel_threshold.clamp(64, 10_000_000),
        }
    }
}

/// `$HUEFINDER_CONFIG` first, then the working directory, the executable's
/// directory and the per-user config directory.
fn search_locations() -> Vec<PathBuf> {
    let explicit = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    let dirs = [
        std::env::current_dir().ok(),
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf)),
        ProjectDirs::from("dev", "Huefinder", "Huefinder").map(|p| p.config_dir().to_path_buf()),
    ];
    explicit
        .into_iter()
        .chain(dirs.into_iter().flatten().map(|dir| dir.join(CONFIG_FILE_NAME)))
        .collect()
}
