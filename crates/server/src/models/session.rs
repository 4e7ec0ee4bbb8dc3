//! Session-related types for authentication.
//!
//! Types stored in the session for authentication and cart state.

use serde::{Deserialize, Serialize};

use driftwood_core::Username;

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// The authenticated username.
    pub username: Username,
}

impl CurrentUser {
    /// Whether this user holds the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.username.is_admin()
    }
}

/// Session keys for per-session state.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the session's working cart.
    pub const CART: &str = "cart";
}
