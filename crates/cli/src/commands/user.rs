//! User management commands.
//!
//! Operates directly on the users JSON file; the server picks up
//! changes the next time it opens the store.
//!
//! # Environment Variables
//!
//! - `DRIFTWOOD_USERS_FILE` - Path to the users JSON file

use thiserror::Error;

use driftwood_core::{Username, UsernameError};
use driftwood_server::users::{StoreError, UserStore};

/// Default users file, matching the server's default.
const DEFAULT_USERS_FILE: &str = "data/users.json";

/// Errors that can occur during user commands.
#[derive(Debug, Error)]
pub enum UserCommandError {
    /// The username did not validate.
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    /// The user store rejected the operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

fn open_store() -> Result<UserStore, UserCommandError> {
    dotenvy::dotenv().ok();
    let path = std::env::var("DRIFTWOOD_USERS_FILE")
        .unwrap_or_else(|_| DEFAULT_USERS_FILE.to_owned());
    Ok(UserStore::open(path)?)
}

/// Create a new user.
pub fn add(username: &str, password: &str) -> Result<(), UserCommandError> {
    let username = Username::parse(username)?;
    let store = open_store()?;
    store.add(&username, password)?;
    tracing::info!("Created user: {username}");
    Ok(())
}

/// Delete a user. The admin account is protected.
pub fn delete(username: &str) -> Result<(), UserCommandError> {
    let username = Username::parse(username)?;
    let store = open_store()?;
    store.delete(&username)?;
    tracing::info!("Deleted user: {username}");
    Ok(())
}

/// Reset a user's password.
pub fn reset(username: &str, password: &str) -> Result<(), UserCommandError> {
    let username = Username::parse(username)?;
    let store = open_store()?;
    store.reset_password(&username, password)?;
    tracing::info!("Password reset for: {username}");
    Ok(())
}

/// List all usernames, sorted.
pub fn list() -> Result<(), UserCommandError> {
    let store = open_store()?;
    let usernames = store.usernames()?;
    if usernames.is_empty() {
        tracing::info!("No users");
        return Ok(());
    }
    for username in usernames {
        tracing::info!("{username}");
    }
    Ok(())
}
