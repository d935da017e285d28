mod checksum;
mod io;
mod model;
mod registry;

pub use checksum::compute_catalog_crc32;
pub use io::{CatalogFormat, CatalogLoadOutcome, load_catalog, parse_catalog};
pub use model::{Catalog, CatalogWarning, ColorEntry};
pub use registry::CatalogRegistry;

#[cfg(test)]
mod tests;
