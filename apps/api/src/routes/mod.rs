//! # Routes Module
//!
//! The HTTP surface of the Vendo API.
//!
//! ```text
//! GET    /                      service banner
//! GET    /health                liveness
//! GET    /health/ready          readiness (database probe)
//!
//! GET    /api/products          list the catalog
//! POST   /api/products          create a product
//! POST   /api/products/seed     wipe and reseed the mock catalog
//! GET    /api/products/{id}     fetch one product
//! PUT    /api/products/{id}     partial update
//! DELETE /api/products/{id}     delete a product
//!
//! GET    /api/cart              cart view (items + total)
//! POST   /api/cart              set a cart line (upsert by product)
//! DELETE /api/cart/{id}         remove a cart line
//!
//! POST   /api/checkout          reconcile the cart into an order
//! ```

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

pub mod cart;
pub mod checkout;
pub mod products;

/// A plain message response body.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}

/// Builds the application router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/api", api_router())
}

fn api_router() -> Router<AppState> {
    Router::new()
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route("/products/seed", post(products::seed_products))
        .route(
            "/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/cart", get(cart::get_cart).post(cart::set_cart_line))
        .route("/cart/{id}", delete(cart::remove_cart_line))
        .route("/checkout", post(checkout::process_checkout))
}

/// Service banner.
async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Vendo API is running"))
}

/// Liveness probe. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness probe. Verifies the database answers before returning OK.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.db.health_check().await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
