//! # Order Comment Service
//!
//! The two ways a comment reaches an order, both routed through the
//! status guard.
//!
//! ```text
//! ┌──────────────────────────────┐      ┌──────────────────────────────┐
//! │ Admin action (interactive)   │      │ OrderCommentService          │
//! │ add_admin_comment            │      │ (programmatic / REST)        │
//! │                              │      │                              │
//! │ empty comment + same status? │      │                              │
//! │   └─► validation error       │      │                              │
//! │ resolve_admin_status         │      │ resolve_strict               │
//! │   └─► invalid: keep current  │      │   └─► invalid: error         │
//! │ notify needs sales::emails   │      │                              │
//! └──────────────┬───────────────┘      └──────────────┬───────────────┘
//!                │                                     │
//!                ▼                                     ▼
//!        orders().save_with_history  (one transaction)
//!                │
//!                ▼
//!        CommentSender::send(order, notify, comment)
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use statusguard_core::guard::{resolve_admin_status, StatusGuard};
use statusguard_core::sanitize::clean_comment;
use statusguard_core::scope::CONFIG_PATH_ALLOW_ANY_ORDER_STATUS_CHANGE;
use statusguard_core::validation::ensure_comment_or_status_change;
use statusguard_core::{
    ConfigScope, CoreError, Order, OrderWorkflow, StatusHistoryDraft, StatusHistoryEntry,
    StatusHistoryPayload, ADMIN_SALES_EMAIL_RESOURCE,
};
use statusguard_db::Database;
use tracing::{debug, info, warn};

use crate::auth::AuthorizationChecker;
use crate::error::ApiError;
use crate::mailer::CommentSender;

/// Programmatic order comment operations.
#[async_trait]
pub trait OrderCommentService: Send + Sync {
    /// Adds a comment to an order, possibly changing its status.
    async fn add_comment(
        &self,
        order_id: i64,
        payload: StatusHistoryPayload,
    ) -> Result<bool, ApiError>;

    /// Lists an order's comments, newest first.
    async fn get_comments_list(&self, order_id: i64) -> Result<Vec<StatusHistoryEntry>, ApiError>;
}

/// The registered [`OrderCommentService`]: the stock behaviour with the
/// status guard applied.
#[derive(Clone)]
pub struct GuardedCommentService {
    db: Database,
    sender: Arc<dyn CommentSender>,
}

impl GuardedCommentService {
    pub fn new(db: Database, sender: Arc<dyn CommentSender>) -> Self {
        GuardedCommentService { db, sender }
    }

    async fn load_order(&self, order_id: i64) -> Result<Order, ApiError> {
        self.db
            .orders()
            .find(order_id)
            .await?
            .ok_or_else(|| CoreError::OrderNotFound(order_id).into())
    }
}

#[async_trait]
impl OrderCommentService for GuardedCommentService {
    async fn add_comment(
        &self,
        order_id: i64,
        payload: StatusHistoryPayload,
    ) -> Result<bool, ApiError> {
        let mut order = self.load_order(order_id).await?;

        let allow_any = allow_any_status_change(&self.db, &order).await?;
        let workflow = self.db.workflow().load().await?.unwrap_or_default();

        let status = StatusGuard::new(&workflow, allow_any)
            .resolve_strict(&order, payload.status.as_deref())?;

        let comment = clean_comment(payload.comment.as_deref());
        let notify = payload.is_customer_notified.unwrap_or(false);

        order.status = status.clone();
        self.db
            .orders()
            .save_with_history(
                &order,
                &StatusHistoryDraft {
                    comment: comment.clone(),
                    status,
                    is_customer_notified: notify,
                    is_visible_on_front: payload.is_visible_on_front.unwrap_or(false),
                },
            )
            .await?;

        info!(order_id, status = %order.status, "Order comment added");

        self.sender.send(&order, notify, &comment).await?;
        Ok(true)
    }

    async fn get_comments_list(&self, order_id: i64) -> Result<Vec<StatusHistoryEntry>, ApiError> {
        self.load_order(order_id).await?;
        Ok(self.db.status_history().list_for_order(order_id).await?)
    }
}

/// A comment submitted through the admin order view.
#[derive(Debug, Clone, Default)]
pub struct AdminCommentRequest {
    pub comment: Option<String>,
    /// Blank means "keep the current status".
    pub status: Option<String>,
    pub is_customer_notified: bool,
    pub is_visible_on_front: bool,
}

/// Interactive path: an invalid status silently keeps the current one.
///
/// Returns the saved history entry.
pub async fn add_admin_comment(
    db: &Database,
    sender: &dyn CommentSender,
    auth: &dyn AuthorizationChecker,
    mut order: Order,
    request: AdminCommentRequest,
) -> Result<StatusHistoryEntry, ApiError> {
    let requested = request
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(&order.status)
        .to_string();

    ensure_comment_or_status_change(request.comment.as_deref(), &requested, &order.status)?;

    let allow_any = allow_any_status_change(db, &order).await?;
    let workflow: Option<OrderWorkflow> = db.workflow().load().await?;

    let status = resolve_admin_status(workflow.as_ref(), allow_any, &order, &requested);
    if status != requested {
        warn!(
            order_id = order.id,
            state = %order.state,
            requested = %requested,
            kept = %status,
            "Requested status not valid for order state, keeping current status"
        );
    }

    let mut notify = request.is_customer_notified;
    if notify && !auth.is_allowed(ADMIN_SALES_EMAIL_RESOURCE) {
        warn!(order_id = order.id, "Admin may not email customers, dropping notify flag");
        notify = false;
    }

    let comment = clean_comment(request.comment.as_deref());

    order.status = status.clone();
    let entry = db
        .orders()
        .save_with_history(
            &order,
            &StatusHistoryDraft {
                comment: comment.clone(),
                status,
                is_customer_notified: notify,
                is_visible_on_front: request.is_visible_on_front,
            },
        )
        .await?;

    info!(order_id = order.id, status = %order.status, notify, "Admin comment added");

    sender.send(&order, notify, &comment).await?;
    Ok(entry)
}

/// Reads the any-status override at the order's store scope.
async fn allow_any_status_change(db: &Database, order: &Order) -> Result<bool, ApiError> {
    let allow = db
        .settings()
        .is_set_flag(
            CONFIG_PATH_ALLOW_ANY_ORDER_STATUS_CHANGE,
            ConfigScope::Store(order.store_id),
        )
        .await?;
    debug!(order_id = order.id, allow_any_status_change = allow, "Override flag read");
    Ok(allow)
}
