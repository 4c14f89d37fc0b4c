//! # Email Outbox Repository
//!
//! Customer notifications are queued here instead of being sent inline.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add-comment request                                                   │
//! │       │  order + history saved                                         │
//! │       ▼                                                                 │
//! │  CommentSender::send ──► enqueue() ──► email_outbox (sent_at NULL)    │
//! │                                              │                          │
//! │                                              ▼                          │
//! │  mail delivery process ──► get_pending() ──► mark_sent / mark_failed   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use statusguard_core::{EmailOutboxEntry, OutgoingEmail};

const SELECT_ENTRY: &str = r#"
    SELECT
        id,
        order_id,
        recipient_email,
        recipient_name,
        sender_email,
        sender_name,
        subject,
        body,
        attempts,
        last_error,
        created_at,
        sent_at
    FROM email_outbox
"#;

/// Repository for the email outbox.
#[derive(Debug, Clone)]
pub struct EmailOutboxRepository {
    pool: SqlitePool,
}

impl EmailOutboxRepository {
    /// Creates a new EmailOutboxRepository.
    pub fn new(pool: SqlitePool) -> Self {
        EmailOutboxRepository { pool }
    }

    /// Queues an email for delivery.
    pub async fn enqueue(&self, email: &OutgoingEmail) -> DbResult<EmailOutboxEntry> {
        let entry = EmailOutboxEntry {
            id: Uuid::new_v4().to_string(),
            order_id: email.order_id,
            recipient_email: email.recipient_email.clone(),
            recipient_name: email.recipient_name.clone(),
            sender_email: email.sender_email.clone(),
            sender_name: email.sender_name.clone(),
            subject: email.subject.clone(),
            body: email.body.clone(),
            attempts: 0,
            last_error: None,
            created_at: Utc::now(),
            sent_at: None,
        };

        debug!(
            id = %entry.id,
            order_id = entry.order_id,
            recipient = %entry.recipient_email,
            "Queuing email"
        );

        sqlx::query(
            r#"
            INSERT INTO email_outbox (
                id, order_id, recipient_email, recipient_name,
                sender_email, sender_name, subject, body,
                attempts, last_error, created_at, sent_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&entry.id)
        .bind(entry.order_id)
        .bind(&entry.recipient_email)
        .bind(&entry.recipient_name)
        .bind(&entry.sender_email)
        .bind(&entry.sender_name)
        .bind(&entry.subject)
        .bind(&entry.body)
        .bind(entry.attempts)
        .bind(&entry.last_error)
        .bind(entry.created_at)
        .bind(entry.sent_at)
        .execute(&self.pool)
        .await?;

        Ok(entry)
    }

    /// All emails queued for an order, oldest first.
    pub async fn for_order(&self, order_id: i64) -> DbResult<Vec<EmailOutboxEntry>> {
        let entries = sqlx::query_as::<_, EmailOutboxEntry>(&format!(
            "{SELECT_ENTRY} WHERE order_id = ?1 ORDER BY created_at ASC"
        ))
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Unsent emails, oldest first.
    pub async fn get_pending(&self, limit: u32) -> DbResult<Vec<EmailOutboxEntry>> {
        let entries = sqlx::query_as::<_, EmailOutboxEntry>(&format!(
            "{SELECT_ENTRY} WHERE sent_at IS NULL ORDER BY created_at ASC LIMIT ?1"
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Marks an email as delivered.
    pub async fn mark_sent(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("UPDATE email_outbox SET sent_at = ?2 WHERE id = ?1")
            .bind(id)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Email", id));
        }
        Ok(())
    }

    /// Records a failed delivery attempt.
    pub async fn mark_failed(&self, id: &str, error: &str) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE email_outbox SET attempts = attempts + 1, last_error = ?2 WHERE id = ?1",
        )
        .bind(id)
        .bind(error)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Email", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{database, processing_order};

    fn email(order_id: i64) -> OutgoingEmail {
        OutgoingEmail {
            order_id,
            recipient_email: "jane@example.com".to_string(),
            recipient_name: Some("Jane Doe".to_string()),
            sender_email: "sales@example.com".to_string(),
            sender_name: "Sales".to_string(),
            subject: "Update to your order # 000000001".to_string(),
            body: "Your order is now Processing.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_enqueue_and_list() {
        let db = database().await;
        let order = processing_order(&db, "000000001").await;

        let entry = db.email_outbox().enqueue(&email(order.id)).await.unwrap();
        assert_eq!(entry.attempts, 0);
        assert!(entry.sent_at.is_none());

        let queued = db.email_outbox().for_order(order.id).await.unwrap();
        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0].id, entry.id);
        assert_eq!(queued[0].recipient_name.as_deref(), Some("Jane Doe"));
    }

    #[tokio::test]
    async fn test_delivery_bookkeeping() {
        let db = database().await;
        let order = processing_order(&db, "000000001").await;
        let outbox = db.email_outbox();

        let first = outbox.enqueue(&email(order.id)).await.unwrap();
        let second = outbox.enqueue(&email(order.id)).await.unwrap();

        outbox.mark_failed(&first.id, "connection refused").await.unwrap();
        outbox.mark_sent(&second.id).await.unwrap();

        let pending = outbox.get_pending(10).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, first.id);
        assert_eq!(pending[0].attempts, 1);
        assert_eq!(pending[0].last_error.as_deref(), Some("connection refused"));

        assert!(outbox.mark_sent("missing").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_email_for_unknown_order_rejected() {
        let db = database().await;
        let err = db.email_outbox().enqueue(&email(404)).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
    }
}
