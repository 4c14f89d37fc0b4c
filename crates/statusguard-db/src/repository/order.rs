//! # Order Repository
//!
//! Reads orders and persists a status change together with its history row.
//!
//! ## Adding a Comment
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   save_with_history (one transaction)                   │
//! │                                                                         │
//! │  1. UPDATE sales_order SET status = ?, updated_at = ?                  │
//! │     WHERE entity_id = ?                                                │
//! │                                                                         │
//! │  2. INSERT INTO sales_order_status_history (parent_id, comment, ...)   │
//! │                                                                         │
//! │  COMMIT ← the history row never exists without the order update        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use statusguard_core::{
    Order, OrderState, StatusHistoryDraft, StatusHistoryEntry, ORDER_ENTITY_NAME,
};

const SELECT_ORDER: &str = r#"
    SELECT
        entity_id AS id,
        increment_id,
        state,
        status,
        store_id,
        customer_email,
        customer_name,
        created_at,
        updated_at
    FROM sales_order
"#;

/// Fields needed to place an order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub increment_id: String,
    pub state: OrderState,
    pub status: String,
    pub store_id: i64,
    pub customer_email: Option<String>,
    pub customer_name: Option<String>,
}

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

    /// Inserts an order and returns it with its assigned ID.
    ///
    /// ## Errors
    /// - `UniqueViolation` if the increment ID is taken
    /// - `ForeignKeyViolation` if the store doesn't exist
    pub async fn insert(&self, order: NewOrder) -> DbResult<Order> {
        let now = Utc::now();

        debug!(increment_id = %order.increment_id, "Inserting order");

        let result = sqlx::query(
            r#"
            INSERT INTO sales_order (
                increment_id, state, status, store_id,
                customer_email, customer_name, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
            "#,
        )
        .bind(&order.increment_id)
        .bind(order.state)
        .bind(&order.status)
        .bind(order.store_id)
        .bind(&order.customer_email)
        .bind(&order.customer_name)
        .bind(now)
        .execute(&self.pool)
        .await?;

        self.get(result.last_insert_rowid()).await
    }

    /// Gets an order by ID.
    pub async fn find(&self, id: i64) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(&format!("{SELECT_ORDER} WHERE entity_id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    /// Gets an order by ID, failing with `NotFound` if it doesn't exist.
    pub async fn get(&self, id: i64) -> DbResult<Order> {
        self.find(id)
            .await?
            .ok_or_else(|| DbError::not_found("Order", id))
    }

    /// Gets an order by its customer-facing increment ID.
    pub async fn find_by_increment_id(&self, increment_id: &str) -> DbResult<Option<Order>> {
        let order =
            sqlx::query_as::<_, Order>(&format!("{SELECT_ORDER} WHERE increment_id = ?1"))
                .bind(increment_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(order)
    }

    /// Counts all orders.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales_order")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Saves the order's status and appends a history entry atomically.
    ///
    /// The order's `status` is written as given; its state is left alone.
    pub async fn save_with_history(
        &self,
        order: &Order,
        draft: &StatusHistoryDraft,
    ) -> DbResult<StatusHistoryEntry> {
        let now = Utc::now();

        debug!(
            order_id = order.id,
            status = %draft.status,
            notify = draft.is_customer_notified,
            "Saving order with status history"
        );

        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE sales_order SET status = ?1, updated_at = ?2 WHERE entity_id = ?3",
        )
        .bind(&order.status)
        .bind(now)
        .bind(order.id)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(DbError::not_found("Order", order.id));
        }

        let inserted = sqlx::query(
            r#"
            INSERT INTO sales_order_status_history (
                parent_id, comment, status,
                is_customer_notified, is_visible_on_front, entity_name, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(order.id)
        .bind(&draft.comment)
        .bind(&draft.status)
        .bind(draft.is_customer_notified)
        .bind(draft.is_visible_on_front)
        .bind(ORDER_ENTITY_NAME)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(StatusHistoryEntry {
            id: inserted.last_insert_rowid(),
            order_id: order.id,
            comment: Some(draft.comment.clone()),
            status: Some(draft.status.clone()),
            is_customer_notified: draft.is_customer_notified,
            is_visible_on_front: draft.is_visible_on_front,
            entity_name: ORDER_ENTITY_NAME.to_string(),
            created_at: now,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
