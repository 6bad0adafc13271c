//! # Application State
//!
//! Shared state injected into axum handlers.
//!
//! The `Database` handle wraps a `SqlitePool`, which is internally
//! thread-safe; cloning the state per request is cheap and requires no
//! extra locking.

use vendo_db::Database;

/// Shared application state for request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    /// Creates the application state around a connected database.
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}
