//! Cart route handlers.
//!
//! The cart lives in the session, so each login works with its own
//! in-progress estimate. Every mutation writes the cart back and
//! returns the updated view.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use driftwood_core::{Cart, CartLine, format_amount};

use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::session::keys;
use crate::state::AppState;

/// One cart line as returned to clients.
#[derive(Debug, Serialize)]
pub struct CartLineView {
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub unit_price_display: String,
    pub line_total: f64,
    pub line_total_display: String,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            description: line.description.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            unit_price_display: format_amount(line.unit_price),
            line_total: line.total(),
            line_total_display: format_amount(line.total()),
        }
    }
}

/// Cart response body.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub grand_total: f64,
    pub grand_total_display: String,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            lines: cart.lines().iter().map(CartLineView::from).collect(),
            grand_total: cart.grand_total(),
            grand_total_display: format_amount(cart.grand_total()),
        }
    }
}

/// Request to add a catalog item to the cart.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub description: String,
}

/// Request to change a line's quantity.
#[derive(Debug, Deserialize)]
pub struct SetQuantityRequest {
    pub quantity: u32,
}

/// Read the session cart, defaulting to empty.
pub(crate) async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session.get(keys::CART).await?.unwrap_or_default())
}

/// Write the session cart back.
pub(crate) async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(keys::CART, cart).await?;
    Ok(())
}

/// Return the current cart.
pub async fn show(RequireUser(_user): RequireUser, session: Session) -> Result<Json<CartView>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartView::from(&cart)))
}

/// Add a catalog item by its exact description.
///
/// # Errors
///
/// Returns 404 if no catalog item carries that description and 503 if
/// the catalog cannot be loaded.
pub async fn add_item(
    RequireUser(_user): RequireUser,
    session: Session,
    State(state): State<AppState>,
    Json(body): Json<AddItemRequest>,
) -> Result<Json<CartView>> {
    let catalog = state.catalog().load()?;
    let item = catalog
        .find_by_description(&body.description)
        .ok_or_else(|| AppError::NotFound(format!("No such item: {}", body.description)))?;

    let mut cart = load_cart(&session).await?;
    cart.add(item);
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::from(&cart)))
}

/// Change the quantity of the line at `index` (zero-based).
///
/// # Errors
///
/// Returns 422 for a zero quantity and 404 for an out-of-range index.
pub async fn set_quantity(
    RequireUser(_user): RequireUser,
    session: Session,
    Path(index): Path<usize>,
    Json(body): Json<SetQuantityRequest>,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    cart.set_quantity(index, body.quantity)?;
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::from(&cart)))
}

/// Remove the most recently added line. Removing from an empty cart is
/// a no-op.
pub async fn remove_last(
    RequireUser(_user): RequireUser,
    session: Session,
) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    if cart.remove_last().is_some() {
        save_cart(&session, &cart).await?;
    }

    Ok(Json(CartView::from(&cart)))
}

/// Empty the cart.
pub async fn clear(RequireUser(_user): RequireUser, session: Session) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    cart.clear();
    save_cart(&session, &cart).await?;

    Ok(Json(CartView::from(&cart)))
}
