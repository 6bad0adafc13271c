//! # Cart Repository
//!
//! Database operations for the server-side cart.
//!
//! There is exactly one cart for the whole system; lines are keyed by the
//! product they reference, and the `UNIQUE(product_id)` constraint holds
//! the at-most-one-line-per-product invariant. Upserting an existing
//! product overwrites its quantity - it does not accumulate.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use vendo_core::CartLine;

/// Repository for cart database operations.
#[derive(Debug, Clone)]
pub struct CartRepository {
    pool: SqlitePool,
}

impl CartRepository {
    /// Creates a new CartRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CartRepository { pool }
    }

    /// Lists all cart lines, oldest first.
    pub async fn list_all(&self) -> DbResult<Vec<CartLine>> {
        let lines = sqlx::query_as::<_, CartLine>(
            r#"
            SELECT id, product_id, qty, created_at, updated_at
            FROM cart_items
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Gets the cart line for a product, if one exists.
    pub async fn get_by_product(&self, product_id: &str) -> DbResult<Option<CartLine>> {
        let line = sqlx::query_as::<_, CartLine>(
            r#"
            SELECT id, product_id, qty, created_at, updated_at
            FROM cart_items
            WHERE product_id = ?1
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(line)
    }

    /// Sets the cart line for a product.
    ///
    /// If a line for the product exists its quantity is overwritten with
    /// `qty` (set, not increment); otherwise a new line is created. Returns
    /// the stored line.
    pub async fn upsert_by_product(&self, product_id: &str, qty: i64) -> DbResult<CartLine> {
        debug!(product_id = %product_id, qty = %qty, "Upserting cart line");

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO cart_items (id, product_id, qty, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            ON CONFLICT (product_id) DO UPDATE SET
                qty = excluded.qty,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&id)
        .bind(product_id)
        .bind(qty)
        .bind(now)
        .execute(&self.pool)
        .await?;

        // The conflict path keeps the existing row id, so read the stored
        // line back rather than assuming the generated one.
        self.get_by_product(product_id)
            .await?
            .ok_or_else(|| DbError::Internal("cart line missing after upsert".to_string()))
    }

    /// Deletes a cart line by its own id.
    ///
    /// ## Returns
    /// * `Ok(true)` - the line existed and was removed
    /// * `Ok(false)` - no such line
    pub async fn delete_by_id(&self, id: &str) -> DbResult<bool> {
        debug!(id = %id, "Deleting cart line");

        let result = sqlx::query("DELETE FROM cart_items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Removes every line from the cart.
    pub async fn clear_all(&self) -> DbResult<()> {
        debug!("Clearing cart");

        sqlx::query("DELETE FROM cart_items")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Counts cart lines.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cart_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_upsert_creates_then_overwrites() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.cart();

        let first = repo.upsert_by_product("p1", 3).await.unwrap();
        assert_eq!(first.qty, 3);

        // Same product again: quantity is overwritten, not accumulated,
        // and the line keeps its identity.
        let second = repo.upsert_by_product("p1", 5).await.unwrap();
        assert_eq!(second.qty, 5);
        assert_eq!(second.id, first.id);

        let all = repo.list_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].qty, 5);
    }

    #[tokio::test]
    async fn test_one_line_per_product() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.cart();

        repo.upsert_by_product("p1", 1).await.unwrap();
        repo.upsert_by_product("p2", 2).await.unwrap();
        repo.upsert_by_product("p1", 4).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.cart();

        let line = repo.upsert_by_product("p1", 2).await.unwrap();

        assert!(repo.delete_by_id(&line.id).await.unwrap());
        assert!(!repo.delete_by_id(&line.id).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_clear_all() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.cart();

        repo.upsert_by_product("p1", 1).await.unwrap();
        repo.upsert_by_product("p2", 2).await.unwrap();

        repo.clear_all().await.unwrap();
        assert!(repo.list_all().await.unwrap().is_empty());
    }
}
