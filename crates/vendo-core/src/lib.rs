//! # vendo-core: Pure Business Logic for Vendo
//!
//! This crate is the heart of the Vendo storefront. It contains the business
//! rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  HTTP client                                                        │
//! │       │ JSON over REST                                              │
//! │       ▼                                                             │
//! │  apps/api (axum handlers)                                           │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ★ vendo-core (THIS CRATE) ★                                        │
//! │    types  │  money  │  validation  │  checkout                      │
//! │    NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS               │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  vendo-db (SQLite repositories)                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartLine, Order, OrderLine)
//! - [`money`] - Money type with integer arithmetic (no floating point)
//! - [`checkout`] - Checkout reconciliation: buyer/line validation and
//!   order drafting against authoritative prices
//! - [`validation`] - Field-level input validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. Every function is deterministic - same input, same output
//! 2. No I/O of any kind
//! 3. All monetary values are integer cents (i64), never floats
//! 4. All errors are typed enum variants, never strings or panics

pub mod checkout;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

pub use checkout::{BuyerInfo, OrderDraft};
pub use error::{CheckoutError, ValidationError};
pub use money::Money;
pub use types::*;
