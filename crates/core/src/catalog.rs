//! Price catalog and price-column resolution.
//!
//! The catalog is built once from a tabular source (header row plus data
//! rows) and treated as immutable afterwards. Column names are trimmed at
//! load time; the unit price for every row comes from a single resolved
//! price column.

use serde::{Deserialize, Serialize};

/// Column name that must be present in every catalog source.
pub const DESCRIPTION_COLUMN: &str = "DESCRIPTION";

/// Price column candidates, in resolution priority order.
///
/// The first name found among the source's (trimmed) headers wins. The mix
/// of generic and currency-specific labels is inherited from the catalogs
/// this system has to accept in the field.
pub const PRICE_COLUMN_CANDIDATES: &[&str] = &[
    "TOTAL", "Total", "Price", "PRICE", "PRICE_USD", "PRICE_R$", "CUSTO", "COST", "VALUE",
];

/// Errors that can occur while building a [`Catalog`].
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The header row has no `DESCRIPTION` column.
    #[error("catalog source has no {DESCRIPTION_COLUMN} column")]
    MissingDescriptionColumn,
    /// The source could not be read or parsed.
    ///
    /// Raised by loaders on any I/O or format failure; the catalog is
    /// all-or-nothing, partial data is never surfaced.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// One row of the price list.
///
/// The unit price is already resolved from the catalog's price column;
/// rows whose price cell is missing or unparseable carry `0.0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Item description, matched against search queries.
    pub description: String,
    /// Unit price from the resolved price column.
    pub unit_price: f64,
}

/// An immutable, loaded price catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    price_column: Option<String>,
}

impl Catalog {
    /// Build a catalog from a header row and data rows.
    ///
    /// Headers are trimmed of surrounding whitespace before any lookup.
    /// The price column is resolved once, by candidate priority first and
    /// then by falling back to the first numeric column. When neither
    /// exists the catalog still loads, with every price at `0.0`; callers
    /// should surface that via [`Catalog::price_column`].
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MissingDescriptionColumn`] if no trimmed
    /// header equals `DESCRIPTION`.
    pub fn from_rows(
        headers: &[String],
        rows: &[Vec<String>],
    ) -> Result<Self, CatalogError> {
        let headers: Vec<&str> = headers.iter().map(|h| h.trim()).collect();

        let description_idx = headers
            .iter()
            .position(|h| *h == DESCRIPTION_COLUMN)
            .ok_or(CatalogError::MissingDescriptionColumn)?;

        let price_idx = resolve_price_column(&headers, rows);
        let price_column = price_idx.map(|i| headers.get(i).map_or("", |h| *h).to_owned());

        let items = rows
            .iter()
            .map(|row| CatalogItem {
                description: row.get(description_idx).map_or("", String::as_str).trim().to_owned(),
                unit_price: price_idx
                    .and_then(|i| row.get(i))
                    .and_then(|cell| parse_number(cell))
                    .unwrap_or(0.0),
            })
            .collect();

        Ok(Self {
            items,
            price_column,
        })
    }

    /// All items, in source order.
    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// The resolved price column name, if any.
    #[must_use]
    pub fn price_column(&self) -> Option<&str> {
        self.price_column.as_deref()
    }

    /// Number of rows loaded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Case-insensitive substring search over item descriptions.
    ///
    /// An empty (or all-whitespace) query yields no results rather than
    /// the whole catalog.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&CatalogItem> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        self.items
            .iter()
            .filter(|item| item.description.to_lowercase().contains(&query))
            .collect()
    }

    /// Find an item by its exact description.
    #[must_use]
    pub fn find_by_description(&self, description: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.description == description)
    }
}

/// Resolve which column holds unit prices.
///
/// Candidate names take priority; absent those, the first column whose
/// non-empty cells all parse as numbers is used.
fn resolve_price_column(headers: &[&str], rows: &[Vec<String>]) -> Option<usize> {
    for candidate in PRICE_COLUMN_CANDIDATES {
        if let Some(idx) = headers.iter().position(|h| h == candidate) {
            return Some(idx);
        }
    }

    (0..headers.len()).find(|&idx| is_numeric_column(idx, rows))
}

/// A column is numeric when it has at least one non-empty cell and every
/// non-empty cell parses as a number.
fn is_numeric_column(idx: usize, rows: &[Vec<String>]) -> bool {
    let mut saw_value = false;
    for row in rows {
        let Some(cell) = row.get(idx) else { continue };
        if cell.trim().is_empty() {
            continue;
        }
        if parse_number(cell).is_none() {
            return false;
        }
        saw_value = true;
    }
    saw_value
}

/// Parse a price cell, tolerating surrounding whitespace and thousands
/// separators.
fn parse_number(cell: &str) -> Option<f64> {
    let cleaned = cell.trim().replace(',', "");
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_owned()).collect()
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_resolves_candidate_by_priority() {
        let catalog = Catalog::from_rows(
            &headers(&["DESCRIPTION", "COST", "TOTAL"]),
            &[row(&["Drywall patch", "10.00", "45.00"])],
        )
        .unwrap();

        // TOTAL outranks COST even though COST appears first.
        assert_eq!(catalog.price_column(), Some("TOTAL"));
        assert!((catalog.items()[0].unit_price - 45.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_headers_are_trimmed() {
        let catalog = Catalog::from_rows(
            &headers(&["  DESCRIPTION ", " TOTAL "]),
            &[row(&["Paint", "12.50"])],
        )
        .unwrap();

        assert_eq!(catalog.price_column(), Some("TOTAL"));
        assert_eq!(catalog.items()[0].description, "Paint");
    }

    #[test]
    fn test_falls_back_to_first_numeric_column() {
        let catalog = Catalog::from_rows(
            &headers(&["DESCRIPTION", "UNIT", "AMOUNT"]),
            &[
                row(&["Tarp", "each", "19.99"]),
                row(&["Rope", "ft", "0.45"]),
            ],
        )
        .unwrap();

        assert_eq!(catalog.price_column(), Some("AMOUNT"));
        assert!((catalog.items()[0].unit_price - 19.99).abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_price_column_defaults_to_zero() {
        let catalog = Catalog::from_rows(
            &headers(&["DESCRIPTION", "NOTES"]),
            &[row(&["Tarp", "blue"])],
        )
        .unwrap();

        assert_eq!(catalog.price_column(), None);
        assert!((catalog.items()[0].unit_price - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unparseable_price_cell_is_zero() {
        let catalog = Catalog::from_rows(
            &headers(&["DESCRIPTION", "TOTAL"]),
            &[row(&["Tarp", "n/a"]), row(&["Rope", "1,200.50"])],
        )
        .unwrap();

        assert!((catalog.items()[0].unit_price - 0.0).abs() < f64::EPSILON);
        assert!((catalog.items()[1].unit_price - 1200.50).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_description_column() {
        let result = Catalog::from_rows(&headers(&["ITEM", "TOTAL"]), &[]);
        assert!(matches!(
            result,
            Err(CatalogError::MissingDescriptionColumn)
        ));
    }

    #[test]
    fn test_search_case_insensitive_substring() {
        let catalog = Catalog::from_rows(
            &headers(&["DESCRIPTION", "TOTAL"]),
            &[
                row(&["Drywall patch", "45.00"]),
                row(&["Dry rot treatment", "120.00"]),
                row(&["Paint, interior", "30.00"]),
            ],
        )
        .unwrap();

        let matches = catalog.search("dry");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].description, "Drywall patch");

        let matches = catalog.search("PATCH");
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_search_empty_query_returns_nothing() {
        let catalog = Catalog::from_rows(
            &headers(&["DESCRIPTION", "TOTAL"]),
            &[row(&["Drywall patch", "45.00"])],
        )
        .unwrap();

        assert!(catalog.search("").is_empty());
        assert!(catalog.search("   ").is_empty());
    }

    #[test]
    fn test_find_by_description_exact() {
        let catalog = Catalog::from_rows(
            &headers(&["DESCRIPTION", "TOTAL"]),
            &[row(&["Drywall patch", "45.00"])],
        )
        .unwrap();

        assert!(catalog.find_by_description("Drywall patch").is_some());
        assert!(catalog.find_by_description("drywall patch").is_none());
    }
}
