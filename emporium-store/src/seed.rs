use std::fs;
use std::path::{Path, PathBuf};
use emporium_catalog::NewProduct;
use emporium_core::{Shop, ShopError};
use crate::app_config::CatalogConfig;

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed seed file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Catalog bootstrap failed: {0}")]
    Shop(#[from] ShopError),
}

/// Read a JSON array of products
pub fn read_seed_file(path: &Path) -> Result<Vec<NewProduct>, SeedError> {
    let raw = fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| SeedError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Build a shop whose catalog holds the configured products followed by
/// those in the seed file, if one is set.
pub fn bootstrap(catalog: &CatalogConfig) -> Result<Shop, SeedError> {
    let mut entries = catalog.products.clone();
    if let Some(path) = &catalog.seed_file {
        let seeded = read_seed_file(path)?;
        tracing::info!("Read {} product(s) from {}", seeded.len(), path.display());
        entries.extend(seeded);
    }

    if entries.is_empty() {
        tracing::warn!("No products configured; the catalog is empty");
    }

    Ok(Shop::with_catalog(entries)?)
}
