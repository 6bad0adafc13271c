//! # Checkout Reconciliation
//!
//! The pure half of the checkout flow: buyer validation, proposed-line
//! validation, and order drafting against authoritative catalog prices.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  POST /api/checkout { cartItems, user }                             │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  validate_buyer(name, email)        ← fails before any store access │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  for each proposed line, in input order:                            │
//! │    validate_line(product_id, qty)   ← InvalidCartLine, fail fast    │
//! │    look up product (API layer)      ← ProductNotFound, fail fast    │
//! │    OrderDraft::add_line(product)    ← price from the catalog only   │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  persist order + clear cart (one transaction, in vendo-db)          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The draft never looks at a client-supplied price: the only way to add a
//! line is through a `Product` fetched from the store, so the accumulated
//! total is tamper-proof by construction.

use serde::{Deserialize, Serialize};

use crate::error::CheckoutError;
use crate::money::Money;
use crate::types::Product;

// =============================================================================
// Buyer Info
// =============================================================================

/// Validated buyer contact info for an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyerInfo {
    pub name: String,
    pub email: String,
}

/// Validates buyer contact info.
///
/// Both fields must be present and non-empty after trimming. Runs before
/// any store access so a bad buyer never touches the catalog or the cart.
///
/// ## Example
/// ```rust
/// use vendo_core::checkout::validate_buyer;
///
/// let buyer = validate_buyer(" Sam ", "sam@x.com").unwrap();
/// assert_eq!(buyer.name, "Sam");
/// assert!(validate_buyer("", "sam@x.com").is_err());
/// ```
pub fn validate_buyer(name: &str, email: &str) -> Result<BuyerInfo, CheckoutError> {
    let name = name.trim();
    let email = email.trim();

    if name.is_empty() || email.is_empty() {
        return Err(CheckoutError::InvalidBuyerInfo);
    }

    Ok(BuyerInfo {
        name: name.to_string(),
        email: email.to_string(),
    })
}

/// Validates a single proposed cart line.
///
/// A line is usable only with a non-empty product id and a positive
/// quantity; anything else is `InvalidCartLine`. Callers stop at the first
/// bad line - there is no partial accumulation of valid lines.
pub fn validate_line(
    product_id: Option<&str>,
    qty: Option<i64>,
) -> Result<(String, i64), CheckoutError> {
    let product_id = product_id.map(str::trim).unwrap_or_default();
    let qty = qty.unwrap_or(0);

    if product_id.is_empty() || qty < 1 {
        return Err(CheckoutError::InvalidCartLine);
    }

    Ok((product_id.to_string(), qty))
}

// =============================================================================
// Order Draft
// =============================================================================

/// A single accepted line in an order draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftLine {
    pub product_id: String,
    pub qty: i64,
    /// Authoritative catalog price at draft time.
    pub unit_price_cents: i64,
}

/// Accumulates accepted order lines and the running total during checkout.
///
/// Lines can only be added from a `Product`, so every unit price comes from
/// the catalog and the total is always
/// `sum(authoritative_price * qty)` over the accepted lines.
///
/// An empty draft is valid: an empty cart checks out as a $0 order.
#[derive(Debug, Clone, Default)]
pub struct OrderDraft {
    lines: Vec<DraftLine>,
    total: Money,
}

impl OrderDraft {
    /// Creates an empty draft.
    pub fn new() -> Self {
        OrderDraft {
            lines: Vec::new(),
            total: Money::zero(),
        }
    }

    /// Appends a line priced from the given product and accumulates the
    /// total.
    pub fn add_line(&mut self, product: &Product, qty: i64) {
        self.total += product.price().multiply_quantity(qty);
        self.lines.push(DraftLine {
            product_id: product.id.clone(),
            qty,
            unit_price_cents: product.price_cents,
        });
    }

    /// The accepted lines, in input order.
    pub fn lines(&self) -> &[DraftLine] {
        &self.lines
    }

    /// The accumulated total.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Number of accepted lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the draft has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(id: &str, price_cents: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            price_cents,
            image_url: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_validate_buyer_trims_and_accepts() {
        let buyer = validate_buyer("  Sam  ", " sam@x.com ").unwrap();
        assert_eq!(buyer.name, "Sam");
        assert_eq!(buyer.email, "sam@x.com");
    }

    #[test]
    fn test_validate_buyer_rejects_missing_fields() {
        assert_eq!(
            validate_buyer("", "sam@x.com"),
            Err(CheckoutError::InvalidBuyerInfo)
        );
        assert_eq!(
            validate_buyer("Sam", ""),
            Err(CheckoutError::InvalidBuyerInfo)
        );
        assert_eq!(
            validate_buyer("   ", "   "),
            Err(CheckoutError::InvalidBuyerInfo)
        );
    }

    #[test]
    fn test_validate_line() {
        assert_eq!(
            validate_line(Some("p1"), Some(2)).unwrap(),
            ("p1".to_string(), 2)
        );

        // Missing or empty product id
        assert_eq!(
            validate_line(None, Some(2)),
            Err(CheckoutError::InvalidCartLine)
        );
        assert_eq!(
            validate_line(Some(""), Some(2)),
            Err(CheckoutError::InvalidCartLine)
        );

        // Missing, zero, or negative quantity
        assert_eq!(
            validate_line(Some("p1"), None),
            Err(CheckoutError::InvalidCartLine)
        );
        assert_eq!(
            validate_line(Some("p1"), Some(0)),
            Err(CheckoutError::InvalidCartLine)
        );
        assert_eq!(
            validate_line(Some("p1"), Some(-3)),
            Err(CheckoutError::InvalidCartLine)
        );
    }

    #[test]
    fn test_draft_accumulates_catalog_prices() {
        // Product A at 100, product B at 250: [{A, 2}, {B, 1}] totals 450.
        let a = product("a", 100);
        let b = product("b", 250);

        let mut draft = OrderDraft::new();
        draft.add_line(&a, 2);
        draft.add_line(&b, 1);

        assert_eq!(draft.total().cents(), 450);
        assert_eq!(draft.len(), 2);
        assert_eq!(draft.lines()[0].product_id, "a");
        assert_eq!(draft.lines()[0].unit_price_cents, 100);
        assert_eq!(draft.lines()[1].product_id, "b");
        assert_eq!(draft.lines()[1].qty, 1);
    }

    #[test]
    fn test_empty_draft_totals_zero() {
        let draft = OrderDraft::new();
        assert!(draft.is_empty());
        assert_eq!(draft.total(), Money::zero());
    }
}
