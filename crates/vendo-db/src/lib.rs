//! # vendo-db: Database Layer for Vendo
//!
//! Database access for the Vendo storefront: SQLite for storage, sqlx for
//! async operations, embedded migrations so a fresh database bootstraps
//! itself on connect.
//!
//! ## Data Flow
//! ```text
//! axum handler (POST /api/checkout)
//!       │
//!       ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  vendo-db (THIS CRATE)                      │
//! │                                                             │
//! │   Database (pool.rs)      Repositories          Migrations  │
//! │   SqlitePool, WAL    ◄──  ProductRepository     (embedded)  │
//! │   connection mgmt         CartRepository                    │
//! │                           OrderRepository                   │
//! └─────────────────────────────────────────────────────────────┘
//!       │
//!       ▼
//! SQLite database file (or :memory: in tests)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vendo_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./data/vendo.db")).await?;
//! let product = db.products().get_by_id("uuid-here").await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::cart::CartRepository;
pub use repository::order::OrderRepository;
pub use repository::product::ProductRepository;
