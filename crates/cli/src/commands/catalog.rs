//! Catalog inspection commands.
//!
//! # Environment Variables
//!
//! - `DRIFTWOOD_CATALOG` - Path to the catalog CSV file

use driftwood_core::CatalogError;
use driftwood_server::catalog::CatalogStore;

/// Default catalog file, matching the server's default.
const DEFAULT_CATALOG_FILE: &str = "data/catalog.csv";

/// Load the catalog and report its shape.
///
/// Warns when no price column could be resolved, since every unit
/// price then defaults to 0.00.
pub fn check(path: Option<&str>) -> Result<(), CatalogError> {
    dotenvy::dotenv().ok();
    let path = path.map_or_else(
        || {
            std::env::var("DRIFTWOOD_CATALOG")
                .unwrap_or_else(|_| DEFAULT_CATALOG_FILE.to_owned())
        },
        str::to_owned,
    );

    let store = CatalogStore::new(path.clone());
    let catalog = store.load()?;

    tracing::info!(
        "Catalog {path}: {} rows, price column: {}",
        catalog.len(),
        catalog.price_column().unwrap_or("<none>")
    );
    if catalog.price_column().is_none() {
        tracing::warn!("No price column resolved; all unit prices default to 0.00");
    }
    Ok(())
}
