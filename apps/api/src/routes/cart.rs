//! # Cart Routes
//!
//! Handlers for the single server-side cart.
//!
//! Setting a line for a product that is already in the cart overwrites its
//! quantity - it does not accumulate. Callers that want "add one more" read
//! the current quantity first and send the sum.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use vendo_core::validation::validate_quantity;
use vendo_core::{CartLine, Money};

use crate::error::{ApiError, ErrorCode};
use crate::routes::products::ProductDto;
use crate::routes::MessageResponse;
use crate::state::AppState;

// =============================================================================
// DTOs
// =============================================================================

/// A cart line for API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineDto {
    pub id: String,
    pub product_id: String,
    pub qty: i64,
}

impl From<CartLine> for CartLineDto {
    fn from(line: CartLine) -> Self {
        CartLineDto {
            id: line.id,
            product_id: line.product_id,
            qty: line.qty,
        }
    }
}

/// A cart line with its product attached, for the cart view.
///
/// `product` is `null` when the referenced product has been deleted; such
/// lines are excluded from the total.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemView {
    pub id: String,
    pub product_id: String,
    pub qty: i64,
    pub product: Option<ProductDto>,
}

/// The cart view: items plus the total over lines whose product exists.
#[derive(Debug, Clone, Serialize)]
pub struct CartViewResponse {
    pub items: Vec<CartItemView>,
    pub total: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCartLineRequest {
    pub product_id: String,
    pub qty: i64,
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /api/cart` - the cart with products attached.
///
/// Lines whose product has been deleted are returned with `product: null`
/// and skipped - not errored on - when summing the total.
pub async fn get_cart(State(state): State<AppState>) -> Result<Json<CartViewResponse>, ApiError> {
    debug!("get_cart");

    let lines = state.db.cart().list_all().await?;

    let mut items = Vec::with_capacity(lines.len());
    let mut total = Money::zero();

    for line in lines {
        let product = state.db.products().get_by_id(&line.product_id).await?;

        if let Some(ref p) = product {
            total += p.price().multiply_quantity(line.qty);
        }

        items.push(CartItemView {
            id: line.id,
            product_id: line.product_id,
            qty: line.qty,
            product: product.map(ProductDto::from),
        });
    }

    Ok(Json(CartViewResponse {
        items,
        total: total.cents(),
    }))
}

/// `POST /api/cart` - sets the cart line for a product.
///
/// The product must exist; the quantity must be positive. An existing line
/// for the product has its quantity overwritten.
pub async fn set_cart_line(
    State(state): State<AppState>,
    Json(req): Json<SetCartLineRequest>,
) -> Result<(StatusCode, Json<CartLineDto>), ApiError> {
    debug!(product_id = %req.product_id, qty = %req.qty, "set_cart_line");

    validate_quantity(req.qty)?;

    state
        .db
        .products()
        .get_by_id(&req.product_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &req.product_id))?;

    let line = state
        .db
        .cart()
        .upsert_by_product(&req.product_id, req.qty)
        .await?;

    info!(product_id = %line.product_id, qty = %line.qty, "Cart line set");

    Ok((StatusCode::CREATED, Json(CartLineDto::from(line))))
}

/// `DELETE /api/cart/{id}` - removes a cart line by its own id.
pub async fn remove_cart_line(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    debug!(id = %id, "remove_cart_line");

    if !state.db.cart().delete_by_id(&id).await? {
        return Err(ApiError::new(ErrorCode::NotFound, "Item not found in cart"));
    }

    info!(id = %id, "Cart line removed");

    Ok(Json(MessageResponse::new("Item removed from cart")))
}

// =============================================================================
// Unit Tests
// =============================================================================
