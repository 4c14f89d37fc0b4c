//! Customer notification for new order comments.
//!
//! ```text
//! send(order, notify, comment)
//!     │
//!     ├── notify == false ───────────────► Ok(false)
//!     ├── order has no customer email ───► Ok(false)
//!     │
//!     ▼
//! render subject/body (store name, status label, comment)
//!     │
//!     ▼
//! email_outbox ◄── enqueue ──► Ok(true)
//! ```

use async_trait::async_trait;
use statusguard_core::scope::CONFIG_PATH_STORE_NAME;
use statusguard_core::{ConfigScope, Order, OutgoingEmail};
use statusguard_db::Database;
use tracing::{debug, info};

use crate::error::ApiError;

/// Sends the "your order was updated" email for a new comment.
#[async_trait]
pub trait CommentSender: Send + Sync {
    /// Returns whether an email was queued.
    async fn send(&self, order: &Order, notify: bool, comment: &str) -> Result<bool, ApiError>;
}

/// [`CommentSender`] that queues into the email outbox.
#[derive(Debug, Clone)]
pub struct OutboxCommentSender {
    db: Database,
    from_address: String,
    from_name: String,
}

impl OutboxCommentSender {
    pub fn new(db: Database, from_address: String, from_name: String) -> Self {
        OutboxCommentSender {
            db,
            from_address,
            from_name,
        }
    }
}

#[async_trait]
impl CommentSender for OutboxCommentSender {
    async fn send(&self, order: &Order, notify: bool, comment: &str) -> Result<bool, ApiError> {
        if !notify {
            return Ok(false);
        }

        let Some(recipient) = order.customer_email.clone() else {
            debug!(order_id = order.id, "Order has no customer email, not notifying");
            return Ok(false);
        };

        let store_name = self
            .db
            .settings()
            .get_value(CONFIG_PATH_STORE_NAME, ConfigScope::Store(order.store_id))
            .await?
            .unwrap_or_else(|| self.from_name.clone());

        let workflow = self.db.workflow().load().await?;
        let status_label = workflow
            .as_ref()
            .and_then(|w| w.status_label(&order.status))
            .unwrap_or(&order.status);

        let (subject, body) = render_comment_email(order, &store_name, status_label, comment);

        let entry = self
            .db
            .email_outbox()
            .enqueue(&OutgoingEmail {
                order_id: order.id,
                recipient_email: recipient,
                recipient_name: order.customer_name.clone(),
                sender_email: self.from_address.clone(),
                sender_name: self.from_name.clone(),
                subject,
                body,
            })
            .await?;

        info!(
            order_id = order.id,
            email_id = %entry.id,
            "Queued order comment email"
        );
        Ok(true)
    }
}

/// Renders the subject and plain-text body of an order comment email.
pub fn render_comment_email(
    order: &Order,
    store_name: &str,
    status_label: &str,
    comment: &str,
) -> (String, String) {
    let subject = format!("Update to your {} order", store_name);

    let mut body = String::new();
    if let Some(name) = order.customer_name.as_deref().filter(|n| !n.is_empty()) {
        body.push_str(&format!("{},\n\n", name));
    }
    body.push_str(&format!(
        "Your order # {} has been updated with a status of {}.\n",
        order.increment_id, status_label
    ));
    if !comment.is_empty() {
        body.push('\n');
        body.push_str(comment);
        body.push('\n');
    }
    body.push_str(&format!("\nThank you,\n{}\n", store_name));

    (subject, body)
}
