//! Catalog loading and caching.
//!
//! Reads the price catalog CSV and hands out an immutable [`Catalog`].
//! Loads are cached per source path and modification timestamp, so an
//! edited catalog file is picked up on the next request without a
//! restart while an unchanged file is parsed only once.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use moka::sync::Cache;

use driftwood_core::{Catalog, CatalogError};

/// Cached catalog loads to keep around; keys for older mtimes age out.
const CACHE_CAPACITY: u64 = 4;

/// Cache key for a catalog load: source identity plus modification time.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct CatalogKey {
    path: PathBuf,
    modified: SystemTime,
}

/// Loader and cache for the price catalog.
pub struct CatalogStore {
    path: PathBuf,
    cache: Cache<CatalogKey, Arc<Catalog>>,
}

impl CatalogStore {
    /// Create a store reading from the CSV at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Cache::new(CACHE_CAPACITY),
        }
    }

    /// Path of the catalog source file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the catalog, from cache when the file is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Unavailable`] when the file is missing or
    /// unparseable; partial data is never returned.
    pub fn load(&self) -> Result<Arc<Catalog>, CatalogError> {
        let modified = fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .map_err(|e| CatalogError::Unavailable(e.to_string()))?;

        let key = CatalogKey {
            path: self.path.clone(),
            modified,
        };

        if let Some(catalog) = self.cache.get(&key) {
            return Ok(catalog);
        }

        let catalog = Arc::new(read_catalog(&self.path)?);
        tracing::info!(
            path = %self.path.display(),
            rows = catalog.len(),
            price_column = catalog.price_column().unwrap_or("<none>"),
            "catalog loaded"
        );
        self.cache.insert(key, Arc::clone(&catalog));
        Ok(catalog)
    }
}

/// Read and parse the CSV source into a catalog.
fn read_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let mut reader =
        csv::Reader::from_path(path).map_err(|e| CatalogError::Unavailable(e.to_string()))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| CatalogError::Unavailable(e.to_string()))?
        .iter()
        .map(str::to_owned)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| CatalogError::Unavailable(e.to_string()))?;
        rows.push(record.iter().map(str::to_owned).collect());
    }

    let catalog = Catalog::from_rows(&headers, &rows)?;
    if catalog.price_column().is_none() {
        tracing::warn!(
            path = %path.display(),
            headers = headers.join(", "),
            "no price column resolved; every item will price at 0.00"
        );
    }
    Ok(catalog)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn write_temp_catalog(tag: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "driftwood-catalog-{tag}-{}.csv",
            std::process::id()
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_resolves_rows_and_price_column() {
        let path = write_temp_catalog(
            "basic",
            "DESCRIPTION,TOTAL\nDrywall patch,45.00\nPaint,12.50\n",
        );
        let store = CatalogStore::new(&path);

        let catalog = store.load().unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.price_column(), Some("TOTAL"));
        assert!((catalog.items()[0].unit_price - 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_missing_file_is_unavailable() {
        let store = CatalogStore::new("/nonexistent/driftwood-test.csv");
        assert!(matches!(
            store.load(),
            Err(CatalogError::Unavailable(_))
        ));
    }

    #[test]
    fn test_load_missing_description_column() {
        let path = write_temp_catalog("no-desc", "ITEM,TOTAL\nDrywall patch,45.00\n");
        let store = CatalogStore::new(&path);
        assert!(matches!(
            store.load(),
            Err(CatalogError::MissingDescriptionColumn)
        ));
    }

    #[test]
    fn test_repeated_loads_share_the_cached_catalog() {
        let path = write_temp_catalog("cached", "DESCRIPTION,TOTAL\nDrywall patch,45.00\n");
        let store = CatalogStore::new(&path);

        let first = store.load().unwrap();
        let second = store.load().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
