//! # Checkout Route
//!
//! The checkout reconciler: turns the proposed cart into an order with
//! prices re-derived from the catalog, then clears the cart.
//!
//! ```text
//! POST /api/checkout { cartItems: [{productId, qty}], user: {name, email} }
//!       │
//!       ▼
//! validate buyer                       ← InvalidBuyerInfo, no store access
//!       │
//!       ▼
//! per line, in input order:
//!   validate line                      ← InvalidCartLine, fail fast
//!   fetch product by id                ← ProductNotFound, fail fast
//!   draft.add_line(product, qty)       ← price from the catalog, never
//!       │                                from the request body
//!       ▼
//! insert order + lines, clear cart     ← one transaction
//!       │
//!       ▼
//! 201 { receipt: { total, timestamp, message: "Checkout successful" } }
//! ```
//!
//! Any failure before the transaction leaves both stores untouched; the
//! caller sees all-or-nothing behavior.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use vendo_core::checkout::{validate_buyer, validate_line, OrderDraft};
use vendo_core::{CheckoutError, Order, OrderLine};

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Proposed lines. May be empty: an empty cart checks out as $0.
    #[serde(default)]
    pub cart_items: Vec<CartItemInput>,

    /// Buyer contact info.
    #[serde(default)]
    pub user: BuyerInput,
}

/// A proposed line as received from the client.
///
/// Fields are optional so that malformed lines reach the reconciler and
/// fail with its own error instead of a deserialization error. Unknown
/// fields - including any client-supplied price - are dropped by serde.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemInput {
    #[serde(default)]
    pub product_id: Option<String>,
    #[serde(default)]
    pub qty: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuyerInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// The receipt returned to the caller. Derived from the order, never
/// persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ReceiptDto {
    pub total: i64,
    pub timestamp: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    pub receipt: ReceiptDto,
}

// =============================================================================
// Handler
// =============================================================================

/// `POST /api/checkout` - reconciles the proposed cart into an order.
pub async fn process_checkout(
    State(state): State<AppState>,
    Json(req): Json<CheckoutRequest>,
) -> Result<(StatusCode, Json<CheckoutResponse>), ApiError> {
    debug!(lines = req.cart_items.len(), "process_checkout");

    // Buyer first: a bad buyer never touches the stores.
    let buyer = validate_buyer(
        req.user.name.as_deref().unwrap_or(""),
        req.user.email.as_deref().unwrap_or(""),
    )?;

    // Accept lines in input order, failing fast on the first bad one.
    let mut draft = OrderDraft::new();
    for item in &req.cart_items {
        let (product_id, qty) = validate_line(item.product_id.as_deref(), item.qty)?;

        let product = state
            .db
            .products()
            .get_by_id(&product_id)
            .await?
            .ok_or(CheckoutError::ProductNotFound(product_id))?;

        draft.add_line(&product, qty);
    }

    let order_id = Uuid::new_v4().to_string();
    let now = Utc::now();

    let order = Order {
        id: order_id.clone(),
        buyer_name: buyer.name,
        buyer_email: buyer.email,
        total_cents: draft.total().cents(),
        created_at: now,
    };

    let lines: Vec<OrderLine> = draft
        .lines()
        .iter()
        .enumerate()
        .map(|(position, line)| OrderLine {
            id: Uuid::new_v4().to_string(),
            order_id: order_id.clone(),
            product_id: line.product_id.clone(),
            qty: line.qty,
            unit_price_cents: line.unit_price_cents,
            position: position as i64,
            created_at: now,
        })
        .collect();

    // Order insert and cart clear commit together.
    state.db.orders().insert_checkout(&order, &lines).await?;

    info!(
        order_id = %order.id,
        total = %order.total_cents,
        items = lines.len(),
        "Checkout complete"
    );

    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            receipt: ReceiptDto {
                total: order.total_cents,
                timestamp: now.to_rfc3339(),
                message: "Checkout successful".to_string(),
            },
        }),
    ))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use vendo_core::Product;
    use vendo_db::{Database, DbConfig};

    async fn test_state() -> AppState {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        AppState::new(db)
    }

    async fn insert_product(state: &AppState, id: &str, price_cents: i64) -> Product {
        let now = Utc::now();
        let product = Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            price_cents,
            image_url: String::new(),
            created_at: now,
            updated_at: now,
        };
        state.db.products().insert(&product).await.unwrap()
    }

    fn item(product_id: &str, qty: i64) -> CartItemInput {
        CartItemInput {
            product_id: Some(product_id.to_string()),
            qty: Some(qty),
        }
    }

    fn buyer(name: &str, email: &str) -> BuyerInput {
        BuyerInput {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
        }
    }

    #[tokio::test]
    async fn test_checkout_totals_from_store_prices() {
        // Product A at 100, product B at 250; [{A,2},{B,1}] totals 450.
        let state = test_state().await;
        insert_product(&state, "a", 100).await;
        insert_product(&state, "b", 250).await;

        state.db.cart().upsert_by_product("a", 2).await.unwrap();
        state.db.cart().upsert_by_product("b", 1).await.unwrap();

        let (status, Json(resp)) = process_checkout(
            State(state.clone()),
            Json(CheckoutRequest {
                cart_items: vec![item("a", 2), item("b", 1)],
                user: buyer("Sam", "sam@x.com"),
            }),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(resp.receipt.total, 450);
        assert_eq!(resp.receipt.message, "Checkout successful");

        // Cart cleared, one order persisted with lines in input order
        assert_eq!(state.db.cart().count().await.unwrap(), 0);
        assert_eq!(state.db.orders().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_checkout_persists_snapshot_lines() {
        let state = test_state().await;
        insert_product(&state, "a", 100).await;
        insert_product(&state, "b", 250).await;

        process_checkout(
            State(state.clone()),
            Json(CheckoutRequest {
                cart_items: vec![item("a", 2), item("b", 1)],
                user: buyer("Sam", "sam@x.com"),
            }),
        )
        .await
        .unwrap();

        // Raise a price after the fact; the stored order is untouched.
        let mut a = state.db.products().get_by_id("a").await.unwrap().unwrap();
        a.price_cents = 9999;
        state.db.products().update(&a).await.unwrap();

        let orders = state.db.orders().list_all().await.unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].total_cents, 450);

        let lines = state.db.orders().get_items(&orders[0].id).await.unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].product_id, "a");
        assert_eq!(lines[0].unit_price_cents, 100);
        assert_eq!(lines[1].product_id, "b");
        assert_eq!(lines[1].unit_price_cents, 250);
    }

    #[tokio::test]
    async fn test_client_price_is_ignored() {
        // A request smuggling price fields deserializes cleanly - serde
        // drops them - and the total still comes from the store.
        let state = test_state().await;
        insert_product(&state, "a", 100).await;

        let req: CheckoutRequest = serde_json::from_value(serde_json::json!({
            "cartItems": [{ "productId": "a", "qty": 2, "price": 1 }],
            "user": { "name": "Sam", "email": "sam@x.com", "price": 0 }
        }))
        .unwrap();

        let (_, Json(resp)) = process_checkout(State(state), Json(req)).await.unwrap();
        assert_eq!(resp.receipt.total, 200);
    }

    #[tokio::test]
    async fn test_invalid_buyer_writes_nothing() {
        let state = test_state().await;
        insert_product(&state, "a", 100).await;
        state.db.cart().upsert_by_product("a", 1).await.unwrap();

        for user in [
            buyer("", "sam@x.com"),
            buyer("Sam", ""),
            BuyerInput::default(),
        ] {
            let err = process_checkout(
                State(state.clone()),
                Json(CheckoutRequest {
                    cart_items: vec![item("a", 1)],
                    user,
                }),
            )
            .await
            .unwrap_err();

            assert_eq!(err.code, ErrorCode::ValidationError);
            assert_eq!(err.message, "Name and email are required");
        }

        // No order was created and the cart was not cleared
        assert_eq!(state.db.orders().count().await.unwrap(), 0);
        assert_eq!(state.db.cart().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_missing_product_aborts_whole_checkout() {
        let state = test_state().await;
        insert_product(&state, "a", 100).await;

        state.db.cart().upsert_by_product("a", 1).await.unwrap();
        state.db.cart().upsert_by_product("ghost", 1).await.unwrap();

        let err = process_checkout(
            State(state.clone()),
            Json(CheckoutRequest {
                cart_items: vec![item("a", 1), item("ghost", 1)],
                user: buyer("Sam", "sam@x.com"),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Product with ID ghost not found");

        // No order, and both original cart lines are still there
        assert_eq!(state.db.orders().count().await.unwrap(), 0);
        assert_eq!(state.db.cart().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_malformed_line_fails_fast() {
        let state = test_state().await;
        insert_product(&state, "a", 100).await;

        for bad in [
            CartItemInput {
                product_id: None,
                qty: Some(1),
            },
            CartItemInput {
                product_id: Some("a".to_string()),
                qty: None,
            },
            item("a", 0),
            item("a", -2),
        ] {
            let err = process_checkout(
                State(state.clone()),
                Json(CheckoutRequest {
                    cart_items: vec![bad],
                    user: buyer("Sam", "sam@x.com"),
                }),
            )
            .await
            .unwrap_err();

            assert_eq!(err.message, "Invalid cart item data");
        }

        assert_eq!(state.db.orders().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_empty_cart_checks_out_for_zero() {
        let state = test_state().await;

        let (status, Json(resp)) = process_checkout(
            State(state.clone()),
            Json(CheckoutRequest {
                cart_items: vec![],
                user: buyer("Sam", "sam@x.com"),
            }),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(resp.receipt.total, 0);
        assert_eq!(state.db.orders().count().await.unwrap(), 1);
    }
}
