//! Driftwood Core - Estimate business rules and shared types.
//!
//! This crate provides the types and rules used across all Driftwood
//! components:
//! - `server` - HTTP service driving the estimate workflow
//! - `cli` - Command-line tools for user and catalog administration
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no file
//! access, no HTTP. Catalog files and credential files are read elsewhere;
//! this crate decides what the loaded data means.
//!
//! # Modules
//!
//! - [`types`] - Validated usernames and client information
//! - [`catalog`] - Price catalog, price-column resolution, search
//! - [`cart`] - Estimate cart and total computation
//! - [`money`] - Display formatting for amounts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod money;
pub mod types;

pub use cart::{Cart, CartError, CartLine};
pub use catalog::{Catalog, CatalogError, CatalogItem};
pub use money::format_amount;
pub use types::*;
