//! Estimate cart.
//!
//! The cart is owned by a single operator session and holds the lines of
//! the estimate being assembled. It is serializable so the session layer
//! can carry it between requests.

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogItem;

/// Errors from cart edits.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CartError {
    /// Quantity must be at least 1.
    #[error("quantity must be at least 1")]
    InvalidQuantity,
    /// The referenced line does not exist.
    #[error("no cart line at index {0}")]
    LineOutOfRange(usize),
}

/// One line of an estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// Item description, copied from the catalog at add time.
    pub description: String,
    /// Unit price, copied from the catalog at add time.
    pub unit_price: f64,
    /// Quantity, always >= 1.
    pub quantity: u32,
}

impl CartLine {
    /// The line total: unit price times quantity.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

/// An ordered collection of estimate lines.
///
/// Lines keep insertion order; display order equals the order items were
/// added in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// The current lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Append a catalog item as a new line with quantity 1.
    pub fn add(&mut self, item: &CatalogItem) {
        self.lines.push(CartLine {
            description: item.description.clone(),
            unit_price: item.unit_price,
            quantity: 1,
        });
    }

    /// Overwrite the quantity of the line at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] for `quantity` < 1 and
    /// [`CartError::LineOutOfRange`] for a missing index. The cart is
    /// unchanged on error.
    pub fn set_quantity(&mut self, index: usize, quantity: u32) -> Result<(), CartError> {
        if quantity < 1 {
            return Err(CartError::InvalidQuantity);
        }

        let line = self
            .lines
            .get_mut(index)
            .ok_or(CartError::LineOutOfRange(index))?;
        line.quantity = quantity;
        Ok(())
    }

    /// Remove the most recently added line. A no-op on an empty cart.
    pub fn remove_last(&mut self) -> Option<CartLine> {
        self.lines.pop()
    }

    /// Remove all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of line totals; `0.0` for an empty cart.
    #[must_use]
    pub fn grand_total(&self) -> f64 {
        self.lines.iter().map(CartLine::total).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn item(description: &str, unit_price: f64) -> CatalogItem {
        CatalogItem {
            description: description.to_owned(),
            unit_price,
        }
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = Cart::new();
        cart.add(&item("Drywall patch", 45.0));
        cart.add(&item("Paint", 30.0));
        cart.add(&item("Tarp", 19.99));

        let descriptions: Vec<&str> = cart
            .lines()
            .iter()
            .map(|l| l.description.as_str())
            .collect();
        assert_eq!(descriptions, ["Drywall patch", "Paint", "Tarp"]);
        assert!(cart.lines().iter().all(|l| l.quantity == 1));
    }

    #[test]
    fn test_grand_total_sums_lines() {
        let mut cart = Cart::new();
        cart.add(&item("Drywall patch", 45.0));
        cart.add(&item("Paint", 30.0));
        cart.set_quantity(1, 4).unwrap();

        assert!((cart.grand_total() - (45.0 + 120.0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_grand_total_empty_cart() {
        assert!((Cart::new().grand_total() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_quantity_zero_rejected() {
        let mut cart = Cart::new();
        cart.add(&item("Drywall patch", 45.0));

        assert_eq!(cart.set_quantity(0, 0), Err(CartError::InvalidQuantity));
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_set_quantity_bad_index() {
        let mut cart = Cart::new();
        assert_eq!(cart.set_quantity(3, 2), Err(CartError::LineOutOfRange(3)));
    }

    #[test]
    fn test_remove_last_pops_most_recent() {
        let mut cart = Cart::new();
        cart.add(&item("Drywall patch", 45.0));
        cart.add(&item("Paint", 30.0));

        let removed = cart.remove_last().unwrap();
        assert_eq!(removed.description, "Paint");
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_remove_last_empty_is_noop() {
        let mut cart = Cart::new();
        assert!(cart.remove_last().is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add(&item("Drywall patch", 45.0));
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_drywall_patch_times_three() {
        let mut cart = Cart::new();
        cart.add(&item("Drywall patch", 45.0));
        cart.set_quantity(0, 3).unwrap();
        assert!((cart.grand_total() - 135.0).abs() < f64::EPSILON);
    }
}
