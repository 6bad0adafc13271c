//! # Repositories
//!
//! Repository implementations for database access. Each repository wraps
//! the shared `SqlitePool` and owns the SQL for one aggregate:
//!
//! - [`product`] - catalog CRUD and lookups
//! - [`cart`] - the single server-side cart (list, upsert, remove, clear)
//! - [`order`] - checkout persistence and order reads

pub mod cart;
pub mod order;
pub mod product;
