//! # Domain Types
//!
//! Core domain types used throughout the status guard.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────────┐   ┌─────────────────┐  │
//! │  │      Order      │   │  StatusHistoryEntry  │   │  OutgoingEmail  │  │
//! │  │  ─────────────  │   │  ──────────────────  │   │  ─────────────  │  │
//! │  │  id             │◄──│  order_id            │   │  order_id       │  │
//! │  │  increment_id   │   │  comment             │   │  recipient      │  │
//! │  │  state (coarse) │   │  status              │   │  subject        │  │
//! │  │  status (fine)  │   │  notified / visible  │   │  body           │  │
//! │  └─────────────────┘   └──────────────────────┘   └─────────────────┘  │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────────┐                        │
//! │  │   OrderState    │   │ StatusHistoryPayload │  inbound, programmatic │
//! │  │  ─────────────  │   │ StatusHistoryDraft   │  unsaved history row   │
//! │  │  New            │   └──────────────────────┘                        │
//! │  │  Processing ... │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State vs Status
//! The state is a closed set of workflow buckets. The status is an open,
//! configurable label; which statuses belong to which state lives in
//! [`crate::workflow::OrderWorkflow`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;
use crate::scope::is_flag_value;

// =============================================================================
// Order State
// =============================================================================

/// Coarse workflow bucket of an order.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum OrderState {
    #[default]
    New,
    PendingPayment,
    Processing,
    Complete,
    Closed,
    Canceled,
    /// On hold. The stored code keeps the historical spelling.
    Holded,
    PaymentReview,
}

impl OrderState {
    /// Every state, in workflow order.
    pub const ALL: [OrderState; 8] = [
        OrderState::New,
        OrderState::PendingPayment,
        OrderState::Processing,
        OrderState::Complete,
        OrderState::Closed,
        OrderState::Canceled,
        OrderState::Holded,
        OrderState::PaymentReview,
    ];

    /// Returns the stored state code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderState::New => "new",
            OrderState::PendingPayment => "pending_payment",
            OrderState::Processing => "processing",
            OrderState::Complete => "complete",
            OrderState::Closed => "closed",
            OrderState::Canceled => "canceled",
            OrderState::Holded => "holded",
            OrderState::PaymentReview => "payment_review",
        }
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderState {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderState::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| CoreError::UnknownState(s.to_string()))
    }
}

// =============================================================================
// Order
// =============================================================================

/// An order as far as the guard is concerned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    /// Internal identifier.
    pub id: i64,

    /// Human-facing order number shown to customers.
    pub increment_id: String,

    /// Coarse workflow bucket.
    pub state: OrderState,

    /// Fine-grained status code within the state.
    pub status: String,

    /// Store the order was placed in. Drives configuration scope.
    pub store_id: i64,

    pub customer_email: Option<String>,
    pub customer_name: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Status History
// =============================================================================

/// A persisted comment/status record attached to an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct StatusHistoryEntry {
    pub id: i64,
    pub order_id: i64,
    pub comment: Option<String>,
    pub status: Option<String>,
    pub is_customer_notified: bool,
    pub is_visible_on_front: bool,
    pub entity_name: String,
    pub created_at: DateTime<Utc>,
}

/// A history entry that has passed the guard but is not yet saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusHistoryDraft {
    pub comment: String,
    pub status: String,
    pub is_customer_notified: bool,
    pub is_visible_on_front: bool,
}

/// Structured payload of the programmatic "add comment to order" call.
///
/// Every field is optional: a payload without `status` records a comment
/// against the order's current status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusHistoryPayload {
    #[serde(default)]
    pub comment: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_flag")]
    pub is_customer_notified: Option<bool>,

    #[serde(default, deserialize_with = "deserialize_optional_flag")]
    pub is_visible_on_front: Option<bool>,
}

// =============================================================================
// Email Outbox
// =============================================================================

/// A customer notification ready to be queued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub order_id: i64,
    pub recipient_email: String,
    pub recipient_name: Option<String>,
    pub sender_email: String,
    pub sender_name: String,
    pub subject: String,
    pub body: String,
}

/// A queued notification in the email outbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct EmailOutboxEntry {
    pub id: String,
    pub order_id: i64,
    pub recipient_email: String,
    pub recipient_name: Option<String>,
    pub sender_email: String,
    pub sender_name: String,
    pub subject: String,
    pub body: String,
    /// Number of delivery attempts.
    pub attempts: i64,
    /// Last delivery error, if any.
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Flag Deserialization
// =============================================================================

/// Wire shapes accepted for a boolean flag: `true`, `1`, `"1"`, `"on"`...
#[derive(Deserialize)]
#[serde(untagged)]
enum FlagRepr {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl FlagRepr {
    fn truthy(&self) -> bool {
        match self {
            FlagRepr::Bool(b) => *b,
            FlagRepr::Int(n) => *n != 0,
            FlagRepr::Text(s) => is_flag_value(s),
        }
    }
}

/// Deserializes an optional lenient boolean flag; `null` stays `None`.
pub fn deserialize_optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<FlagRepr>::deserialize(deserializer)?.map(|f| f.truthy()))
}

// =============================================================================
// Unit Tests
// =============================================================================
