//! Catalog search route handler.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use driftwood_core::{CatalogItem, format_amount};

use crate::error::Result;
use crate::middleware::RequireUser;
use crate::state::AppState;

/// Query parameters for catalog search.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// One catalog match.
#[derive(Debug, Serialize)]
pub struct SearchItem {
    pub description: String,
    pub unit_price: f64,
    pub unit_price_display: String,
}

impl From<&CatalogItem> for SearchItem {
    fn from(item: &CatalogItem) -> Self {
        Self {
            description: item.description.clone(),
            unit_price: item.unit_price,
            unit_price_display: format_amount(item.unit_price),
        }
    }
}

/// Search response body.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub items: Vec<SearchItem>,
}

/// Case-insensitive substring search over catalog descriptions.
///
/// An empty or whitespace-only query returns no items.
///
/// # Errors
///
/// Returns 503 if the catalog cannot be loaded.
pub async fn search(
    RequireUser(_user): RequireUser,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>> {
    let catalog = state.catalog().load()?;
    let items = catalog
        .search(&query.q)
        .into_iter()
        .map(SearchItem::from)
        .collect();

    Ok(Json(SearchResponse {
        query: query.q,
        items,
    }))
}
