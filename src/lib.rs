//! Search and nearest-match lookup over a fixed catalog of named colors.
//!
//! A [`Catalog`] is built once (usually by [`catalog::load_catalog`]) and
//! injected into a [`SearchEngine`], which filters it by free text and
//! attributes and ranks entries by RGB distance to a query color.

pub mod catalog;
pub mod color;
pub mod config;
pub mod export;
pub mod search;
mod util;

pub use catalog::{Catalog, CatalogRegistry, ColorEntry};
pub use color::{Rgb, distance, find_nearest_colors, hex_to_rgb, is_valid_hex_color, rgb_to_hex};
pub use search::{MatchResult, SearchEngine, SearchFilters, evaluate};
