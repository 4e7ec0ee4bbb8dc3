//! Integration tests for Driftwood Estimates.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the server with a seeded users file and catalog
//! DRIFTWOOD_USERS_FILE=data/users.json \
//! DRIFTWOOD_CATALOG=data/catalog.csv \
//! cargo run -p driftwood-server
//!
//! # Run integration tests
//! cargo test -p driftwood-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `DRIFTWOOD_BASE_URL` - Server base URL (default `http://localhost:3000`)
//! - `DRIFTWOOD_TEST_ADMIN_PASSWORD` - Password for the seeded admin user
//!
//! # Test Categories
//!
//! - `estimate_flow` - Login, search, cart, and PDF generation tests
//! - `admin_users` - User administration tests
