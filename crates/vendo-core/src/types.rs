//! # Domain Types
//!
//! Core domain types used throughout Vendo.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Product        CartLine          Order            OrderLine        │
//! │  ───────        ────────          ─────            ─────────        │
//! │  id (UUID)      id (UUID)         id (UUID)        id (UUID)        │
//! │  name           product_id ──►    buyer_name       order_id (FK)    │
//! │  price_cents    qty               buyer_email      product_id       │
//! │  image_url                        total_cents      qty              │
//! │                                                    unit_price_cents │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Types are row-shaped (flat) so the database layer can map them directly;
//! aggregate views (an order with its lines, a cart with products attached)
//! are assembled in the API layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
///
/// The checkout reconciler only ever reads products; creation, updates, and
/// deletion happen through the catalog management surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4), store-assigned.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Price in cents (smallest currency unit). Never negative.
    pub price_cents: i64,

    /// Image reference (URI). May be empty.
    pub image_url: String,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// A line in the server-side cart.
///
/// `product_id` is a reference, not an ownership relation: the referenced
/// product may be deleted out from under the line, and readers skip such
/// dangling lines. Invariant: at most one line per product in the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CartLine {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// The referenced product.
    pub product_id: String,

    /// Quantity. Positive once validated by the upsert path.
    pub qty: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Order
// =============================================================================

/// A completed checkout. Created exactly once per successful checkout and
/// never mutated or deleted afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub id: String,

    /// Buyer contact info, required non-empty at checkout time.
    pub buyer_name: String,
    pub buyer_email: String,

    /// Sum of `unit_price_cents * qty` over the order's lines, with prices
    /// read from the catalog at checkout time.
    pub total_cents: i64,

    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Returns the total as a Money type.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Order Line
// =============================================================================

/// A line item in an order.
///
/// The unit price is captured at checkout time so order history stays
/// auditable if the catalog price changes later.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderLine {
    pub id: String,
    pub order_id: String,
    pub product_id: String,

    /// Quantity ordered.
    pub qty: i64,

    /// Unit price in cents at checkout time (frozen).
    pub unit_price_cents: i64,

    /// Zero-based position in the checkout request, preserved so the order's
    /// lines read back in input order.
    pub position: i64,

    pub created_at: DateTime<Utc>,
}

impl OrderLine {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Line total (`unit_price * qty`).
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_price_helper() {
        let product = Product {
            id: "p1".to_string(),
            name: "Wireless Headphones".to_string(),
            price_cents: 1499,
            image_url: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(product.price(), Money::from_cents(1499));
    }

    #[test]
    fn test_order_line_total() {
        let line = OrderLine {
            id: "l1".to_string(),
            order_id: "o1".to_string(),
            product_id: "p1".to_string(),
            qty: 3,
            unit_price_cents: 250,
            position: 0,
            created_at: Utc::now(),
        };
        assert_eq!(line.line_total().cents(), 750);
    }
}
