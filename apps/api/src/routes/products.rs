//! # Product Routes
//!
//! Catalog management handlers. The checkout reconciler treats this catalog
//! as the only authority on price, so everything price-shaped enters the
//! system through here.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use vendo_core::validation::{validate_price_cents, validate_product_name};
use vendo_core::Product;

use crate::error::ApiError;
use crate::routes::MessageResponse;
use crate::seed;
use crate::state::AppState;

// =============================================================================
// DTOs
// =============================================================================

/// Product representation for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: String,
    pub name: String,
    pub price_cents: i64,
    pub image_url: String,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        ProductDto {
            id: p.id,
            name: p.name,
            price_cents: p.price_cents,
            image_url: p.image_url,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub price_cents: i64,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price_cents: Option<i64>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeedResponse {
    pub message: String,
    pub products: Vec<ProductDto>,
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /api/products` - lists the catalog.
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductDto>>, ApiError> {
    debug!("list_products");

    let products = state.db.products().list_all().await?;
    Ok(Json(products.into_iter().map(ProductDto::from).collect()))
}

/// `GET /api/products/{id}` - fetches one product.
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductDto>, ApiError> {
    debug!(id = %id, "get_product");

    let product = state
        .db
        .products()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &id))?;

    Ok(Json(ProductDto::from(product)))
}

/// `POST /api/products` - creates a product.
pub async fn create_product(
    State(state): State<AppState>,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductDto>), ApiError> {
    debug!(name = %req.name, "create_product");

    validate_product_name(&req.name)?;
    validate_price_cents(req.price_cents)?;

    let now = Utc::now();
    let product = Product {
        id: Uuid::new_v4().to_string(),
        name: req.name.trim().to_string(),
        price_cents: req.price_cents,
        image_url: req.image_url.unwrap_or_default(),
        created_at: now,
        updated_at: now,
    };

    let created = state.db.products().insert(&product).await?;
    info!(id = %created.id, name = %created.name, "Product created");

    Ok((StatusCode::CREATED, Json(ProductDto::from(created))))
}

/// `PUT /api/products/{id}` - partial update.
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<Json<ProductDto>, ApiError> {
    debug!(id = %id, "update_product");

    let mut product = state
        .db
        .products()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &id))?;

    if let Some(name) = req.name {
        validate_product_name(&name)?;
        product.name = name.trim().to_string();
    }
    if let Some(price_cents) = req.price_cents {
        validate_price_cents(price_cents)?;
        product.price_cents = price_cents;
    }
    if let Some(image_url) = req.image_url {
        product.image_url = image_url;
    }

    state.db.products().update(&product).await?;
    info!(id = %product.id, "Product updated");

    Ok(Json(ProductDto::from(product)))
}

/// `DELETE /api/products/{id}` - removes a product.
///
/// Cart lines referencing the product are left dangling; cart readers skip
/// them.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    debug!(id = %id, "delete_product");

    state.db.products().delete(&id).await?;
    info!(id = %id, "Product deleted");

    Ok(Json(MessageResponse::new("Product removed")))
}

/// `POST /api/products/seed` - wipes and reseeds the mock catalog.
pub async fn seed_products(
    State(state): State<AppState>,
) -> Result<Json<SeedResponse>, ApiError> {
    debug!("seed_products");

    let products = seed::reseed(&state.db).await?;

    Ok(Json(SeedResponse {
        message: "Products seeded successfully".to_string(),
        products: products.into_iter().map(ProductDto::from).collect(),
    }))
}

// =============================================================================
// Unit Tests
// =============================================================================
