//! Application state shared across handlers.

use std::sync::Arc;

use mock_api_core::Store;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The store sits behind one
/// lock, and every handler holds it for its whole read-modify-write, so
/// requests never observe each other half-applied.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: RwLock<Store>,
}

impl AppState {
    /// Create a new application state around `store`.
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store: RwLock::new(store),
            }),
        }
    }

    /// State holding the fixture's seed data.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(Store::seeded())
    }

    /// Shared read access to the store.
    pub async fn read(&self) -> RwLockReadGuard<'_, Store> {
        self.inner.store.read().await
    }

    /// Exclusive write access to the store.
    pub async fn write(&self) -> RwLockWriteGuard<'_, Store> {
        self.inner.store.write().await
    }
}
