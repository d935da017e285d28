use anyhow::{Context as _, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::info;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use huefinder::catalog::{Catalog, CatalogRegistry, load_catalog};
use huefinder::config::AppConfig;
use huefinder::export;
use huefinder::{SearchEngine, SearchFilters, hex_to_rgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "huefinder", version, about = "Search a color catalog")]
struct Cli {
    /// Catalog file (.toml, .json, .csv) or a directory of catalogs.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Catalog key to use when --catalog is a directory.
    #[arg(long, global = true)]
    key: Option<String>,

    /// Config file; defaults to the first huefinder.toml found.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Filter the catalog by text and attributes.
    Search {
        /// Case-insensitive text matched against name, hex, family and tags.
        #[arg(default_value = "")]
        term: String,
        #[arg(long)]
        family: Option<String>,
        #[arg(long)]
        heather: bool,
        #[arg(long)]
        antique: bool,
    },
    /// List the catalog entries closest to a hex color.
    Similar {
        hex: String,
        /// Number of matches; defaults to the configured similar_count.
        #[arg(short)]
        k: Option<usize>,
    },
    /// List the catalog's families.
    Families,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn open_catalog(path: &Path, key: Option<&str>) -> Result<Arc<Catalog>> {
    if path.is_dir() {
        let registry = CatalogRegistry::load_dir(path)?;
        let Some(key) = key else {
            let keys: Vec<&str> = registry.keys().collect();
            bail!(
                "--key is required with a catalog directory; available: {}",
                keys.join(", ")
            );
        };
        return registry
            .get(key)
            .with_context(|| format!("No catalog {key:?} in {}", path.display()));
    }
    let outcome = load_catalog(path)?;
    for warning in &outcome.warnings {
        eprintln!("warning: {warning}");
    }
    Ok(Arc::new(outcome.catalog))
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    }
    .sanitized();

    let catalog_path = cli
        .catalog
        .as_ref()
        .or(config.catalog.as_ref())
        .context("No catalog given: pass --catalog or set `catalog` in huefinder.toml")?;
    let catalog = open_catalog(catalog_path, cli.key.as_deref())?;
    info!(
        "catalog {:?} with {} entries",
        catalog.key().unwrap_or_default(),
        catalog.len()
    );

    let mut engine = SearchEngine::new(catalog)
        .with_cache_capacity(config.cache_capacity)
        .with_parallel_threshold(config.parallel_threshold);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Search {
            term,
            family,
            heather,
            antique,
        } => {
            engine.set_search_term(term);
            engine.set_filters(SearchFilters {
                family,
                is_heather: heather.then_some(true),
                is_antique: antique.then_some(true),
            });
            let results = engine.results();
            match cli.format {
                OutputFormat::Table => {
                    out.write_all(export::render_entries_table(&results).as_bytes())?;
                }
                OutputFormat::Csv => export::write_entries_csv(&mut out, &results)?,
                OutputFormat::Json => export::write_entries_json(&mut out, &results)?,
            }
        }
        Command::Similar { hex, k } => {
            if hex_to_rgb(&hex).is_none() {
                bail!("{hex:?} is not a hex color (expected #RRGGBB or #RGB)");
            }
            let matches = engine.similar_matches(&hex, k.unwrap_or(config.similar_count));
            match cli.format {
                OutputFormat::Table => {
                    out.write_all(export::render_matches_table(&matches).as_bytes())?;
                }
                OutputFormat::Csv => export::write_matches_csv(&mut out, &matches)?,
                OutputFormat::Json => export::write_matches_json(&mut out, &matches)?,
            }
        }
        Command::Families => {
            let families = engine.available_families();
            if cli.format == OutputFormat::Json {
                serde_json::to_writer_pretty(&mut out, &families)?;
            } else {
                for family in families {
                    writeln!(out, "{family}")?;
                }
            }
        }
    }
    if cli.format == OutputFormat::Json {
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}
