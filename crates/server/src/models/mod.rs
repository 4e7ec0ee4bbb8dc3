//! Server-side models.

pub mod session;
