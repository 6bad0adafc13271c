//! # Catalog Seeding
//!
//! Populates the catalog with the fixed mock products used by the demo
//! storefront. Runs once at startup when the catalog is empty, and on
//! demand through `POST /api/products/seed` (which wipes and reinserts).

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use vendo_core::Product;
use vendo_db::{Database, DbResult};

/// The mock catalog: (name, price in cents, image URL).
const MOCK_PRODUCTS: &[(&str, i64, &str)] = &[
    (
        "Wireless Headphones",
        1499,
        "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=400&h=400&fit=crop",
    ),
    (
        "Smart Watch",
        2999,
        "https://images.unsplash.com/photo-1523275335684-37898b6baf30?w=400&h=400&fit=crop",
    ),
    (
        "Bluetooth Speaker",
        1299,
        "https://images.unsplash.com/photo-1608043152269-423dbba4e7e1?w=400&h=400&fit=crop",
    ),
    (
        "Gaming Mouse",
        799,
        "https://images.unsplash.com/photo-1527864550417-7fd91fc51a46?w=400&h=400&fit=crop",
    ),
    (
        "Mechanical Keyboard",
        1999,
        "https://images.unsplash.com/photo-1587829741301-dc798b83add3?w=400&h=400&fit=crop",
    ),
    (
        "Laptop",
        45999,
        "https://images.unsplash.com/photo-1531297484001-80022131f5a1?w=400&h=400&fit=crop",
    ),
];

/// Builds the mock products with fresh ids and timestamps.
fn mock_products() -> Vec<Product> {
    let now = Utc::now();
    MOCK_PRODUCTS
        .iter()
        .map(|(name, price_cents, image_url)| Product {
            id: Uuid::new_v4().to_string(),
            name: (*name).to_string(),
            price_cents: *price_cents,
            image_url: (*image_url).to_string(),
            created_at: now,
            updated_at: now,
        })
        .collect()
}

/// Seeds the mock catalog if the products table is empty.
///
/// ## Returns
/// The number of products inserted (0 when the catalog already has data).
pub async fn seed_if_empty(db: &Database) -> DbResult<usize> {
    if db.products().count().await? > 0 {
        return Ok(0);
    }

    let products = mock_products();
    for product in &products {
        db.products().insert(product).await?;
    }

    info!(count = products.len(), "Seeded mock product catalog");
    Ok(products.len())
}

/// Clears the catalog and inserts the mock products.
///
/// ## Returns
/// The inserted products.
pub async fn reseed(db: &Database) -> DbResult<Vec<Product>> {
    db.products().delete_all().await?;

    let products = mock_products();
    for product in &products {
        db.products().insert(product).await?;
    }

    info!(count = products.len(), "Reseeded mock product catalog");
    Ok(products)
}

// =============================================================================
// Unit Tests
// =============================================================================
