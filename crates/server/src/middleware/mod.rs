//! Middleware configuration.

pub mod auth;
pub mod session;

pub use auth::{RequireAdmin, RequireUser, clear_session, set_current_user};
