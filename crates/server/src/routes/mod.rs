//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Health check
//!
//! # Auth
//! POST /auth/login                      - Login action
//! POST /auth/logout                     - Logout action
//!
//! # Catalog (requires auth)
//! GET  /search?q=                       - Case-insensitive catalog search
//!
//! # Cart (requires auth, per-session)
//! GET    /cart                          - Current cart
//! DELETE /cart                          - Clear the cart
//! POST   /cart/items                    - Add an item by exact description
//! PUT    /cart/items/{index}            - Change a line's quantity
//! DELETE /cart/items/last               - Remove the most recent line
//!
//! # Estimates (requires auth)
//! POST /estimates                       - Render the cart as a PDF
//!
//! # Admin (requires the admin user)
//! GET    /admin/users                   - List usernames
//! POST   /admin/users                   - Create a user
//! DELETE /admin/users/{username}        - Delete a user
//! PUT    /admin/users/{username}/password - Reset a user's password
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod estimates;
pub mod search;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Create the full application router (without ambient layers).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/search", get(search::search))
        .route("/cart", get(cart::show).delete(cart::clear))
        .route("/cart/items", post(cart::add_item))
        .route("/cart/items/last", delete(cart::remove_last))
        .route("/cart/items/{index}", put(cart::set_quantity))
        .route("/estimates", post(estimates::create))
        .route("/admin/users", get(admin::list_users).post(admin::add_user))
        .route("/admin/users/{username}", delete(admin::delete_user))
        .route(
            "/admin/users/{username}/password",
            put(admin::reset_password),
        )
}
