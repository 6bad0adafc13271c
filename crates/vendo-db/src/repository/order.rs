//! # Order Repository
//!
//! Database operations for orders and order lines.
//!
//! ## Checkout Persistence
//! ```text
//! insert_checkout(order, lines)
//!   BEGIN
//!     INSERT INTO orders ...
//!     INSERT INTO order_items ...   (one per line, position preserved)
//!     DELETE FROM cart_items        (the full-cart clear)
//!   COMMIT
//! ```
//!
//! The order insert and the cart clear commit together: a failure anywhere
//! rolls the whole checkout back, so there is no window where the order
//! exists but the cart still points at already-ordered items.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use vendo_core::{Order, OrderLine};

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Persists a checkout: inserts the order with its lines and clears the
    /// cart, all in one transaction.
    pub async fn insert_checkout(&self, order: &Order, lines: &[OrderLine]) -> DbResult<()> {
        debug!(id = %order.id, total = %order.total_cents, lines = lines.len(), "Inserting order");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, buyer_name, buyer_email, total_cents, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&order.id)
        .bind(&order.buyer_name)
        .bind(&order.buyer_email)
        .bind(order.total_cents)
        .bind(order.created_at)
        .execute(&mut *tx)
        .await?;

        for line in lines {
            sqlx::query(
                r#"
                INSERT INTO order_items
                    (id, order_id, product_id, qty, unit_price_cents, position, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
            )
            .bind(&line.id)
            .bind(&line.order_id)
            .bind(&line.product_id)
            .bind(line.qty)
            .bind(line.unit_price_cents)
            .bind(line.position)
            .bind(line.created_at)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query("DELETE FROM cart_items")
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Lists all orders, oldest first.
    pub async fn list_all(&self) -> DbResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, buyer_name, buyer_email, total_cents, created_at
            FROM orders
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Gets an order by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, buyer_name, buyer_email, total_cents, created_at
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Gets the lines of an order, in the order they were checked out.
    pub async fn get_items(&self, order_id: &str) -> DbResult<Vec<OrderLine>> {
        let lines = sqlx::query_as::<_, OrderLine>(
            r#"
            SELECT id, order_id, product_id, qty, unit_price_cents, position, created_at
            FROM order_items
            WHERE order_id = ?1
            ORDER BY position
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Counts orders.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
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
    use chrono::Utc;

    fn order(id: &str, total_cents: i64) -> Order {
        Order {
            id: id.to_string(),
            buyer_name: "Sam".to_string(),
            buyer_email: "sam@x.com".to_string(),
            total_cents,
            created_at: Utc::now(),
        }
    }

    fn line(id: &str, order_id: &str, product_id: &str, qty: i64, price: i64, pos: i64) -> OrderLine {
        OrderLine {
            id: id.to_string(),
            order_id: order_id.to_string(),
            product_id: product_id.to_string(),
            qty,
            unit_price_cents: price,
            position: pos,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_checkout_persists_order_and_lines() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.orders();

        let o = order("o1", 450);
        let lines = vec![
            line("l1", "o1", "a", 2, 100, 0),
            line("l2", "o1", "b", 1, 250, 1),
        ];

        repo.insert_checkout(&o, &lines).await.unwrap();

        let fetched = repo.get_by_id("o1").await.unwrap().unwrap();
        assert_eq!(fetched.total_cents, 450);
        assert_eq!(fetched.buyer_name, "Sam");

        let items = repo.get_items("o1").await.unwrap();
        assert_eq!(items.len(), 2);
        // Input order preserved
        assert_eq!(items[0].product_id, "a");
        assert_eq!(items[0].unit_price_cents, 100);
        assert_eq!(items[1].product_id, "b");
    }

    #[tokio::test]
    async fn test_insert_checkout_clears_cart() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.cart().upsert_by_product("a", 2).await.unwrap();
        db.cart().upsert_by_product("b", 1).await.unwrap();

        let o = order("o1", 450);
        db.orders()
            .insert_checkout(&o, &[line("l1", "o1", "a", 2, 100, 0)])
            .await
            .unwrap();

        assert_eq!(db.cart().count().await.unwrap(), 0);
        assert_eq!(db.orders().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_insert_checkout_with_no_lines() {
        // An empty cart checks out as a $0 order.
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.orders();

        repo.insert_checkout(&order("o1", 0), &[]).await.unwrap();

        let fetched = repo.get_by_id("o1").await.unwrap().unwrap();
        assert_eq!(fetched.total_cents, 0);
        assert!(repo.get_items("o1").await.unwrap().is_empty());
    }
}
