//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::CatalogStore;
use crate::config::ServerConfig;
use crate::users::{StoreError, UserStore};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the user store and catalog cache.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    users: UserStore,
    catalog: CatalogStore,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Opens the user store at the configured path and prepares the
    /// catalog cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the users file exists but cannot be read or
    /// parsed.
    pub fn new(config: ServerConfig) -> Result<Self, StoreError> {
        let users = UserStore::open(config.users_path.clone())?;
        let catalog = CatalogStore::new(config.catalog_path.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                users,
                catalog,
            }),
        })
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the user store.
    #[must_use]
    pub fn users(&self) -> &UserStore {
        &self.inner.users
    }

    /// Get a reference to the catalog store.
    #[must_use]
    pub fn catalog(&self) -> &CatalogStore {
        &self.inner.catalog
    }
}
