//! Validated value types.

mod client;
mod username;

pub use client::ClientInfo;
pub use username::{Username, UsernameError};
