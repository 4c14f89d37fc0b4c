//! # Status History Repository
//!
//! Read side of `sales_order_status_history`. Rows are written only by
//! [`OrderRepository::save_with_history`](super::order::OrderRepository::save_with_history).

use sqlx::SqlitePool;

use crate::error::DbResult;
use statusguard_core::StatusHistoryEntry;

/// Repository for order status history.
#[derive(Debug, Clone)]
pub struct StatusHistoryRepository {
    pool: SqlitePool,
}

impl StatusHistoryRepository {
    /// Creates a new StatusHistoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StatusHistoryRepository { pool }
    }

    /// Lists an order's history, newest first.
    ///
    /// Entries written within the same second keep insertion order
    /// (later insert listed first).
    pub async fn list_for_order(&self, order_id: i64) -> DbResult<Vec<StatusHistoryEntry>> {
        let entries = sqlx::query_as::<_, StatusHistoryEntry>(
            r#"
            SELECT
                entity_id AS id,
                parent_id AS order_id,
                comment,
                status,
                is_customer_notified,
                is_visible_on_front,
                entity_name,
                created_at
            FROM sales_order_status_history
            WHERE parent_id = ?1
            ORDER BY created_at DESC, entity_id DESC
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Counts history entries for an order.
    pub async fn count_for_order(&self, order_id: i64) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sales_order_status_history WHERE parent_id = ?1",
        )
        .bind(order_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::test_support::{database, processing_order};
    use statusguard_core::StatusHistoryDraft;

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let db = database().await;
        let mut order = processing_order(&db, "000000001").await;

        for (comment, status) in [("first", "processing"), ("second", "fraud")] {
            order.status = status.to_string();
            db.orders()
                .save_with_history(
                    &order,
                    &StatusHistoryDraft {
                        comment: comment.to_string(),
                        status: status.to_string(),
                        is_customer_notified: false,
                        is_visible_on_front: false,
                    },
                )
                .await
                .unwrap();
        }

        let history = db.status_history().list_for_order(order.id).await.unwrap();
        let comments: Vec<_> = history
            .iter()
            .map(|e| e.comment.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(comments, vec!["second", "first"]);
        assert_eq!(db.status_history().count_for_order(order.id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_other_orders_excluded() {
        let db = database().await;
        let a = processing_order(&db, "000000001").await;
        let b = processing_order(&db, "000000002").await;

        db.orders()
            .save_with_history(
                &a,
                &StatusHistoryDraft {
                    comment: "only a".to_string(),
                    status: a.status.clone(),
                    is_customer_notified: false,
                    is_visible_on_front: false,
                },
            )
            .await
            .unwrap();

        assert!(db.status_history().list_for_order(b.id).await.unwrap().is_empty());
    }
}
