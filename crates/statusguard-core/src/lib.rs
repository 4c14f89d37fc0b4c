//! # statusguard-core: Pure Business Logic for the Order Status Guard
//!
//! This crate holds the one business rule the workspace exists for: an
//! order's status may only be changed through a comment to a status that is
//! registered under the order's current state, unless the override flag is
//! set. Everything here is a pure function with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Statusguard Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    admin-api (axum)                             │   │
//! │  │   add-comment form action      REST comment service            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ statusguard-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ workflow  │  │   guard   │  │ sanitize  │  │   │
//! │  │   │   Order   │  │ state ->  │  │  accept / │  │ strip     │  │   │
//! │  │   │  History  │  │ statuses  │  │  reject   │  │ tags      │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                statusguard-db (Database Layer)                  │   │
//! │  │        orders, status history, workflow, scoped settings        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Order, StatusHistoryEntry, payloads)
//! - [`scope`] - Configuration scopes and flag parsing
//! - [`workflow`] - State to valid-statuses mapping
//! - [`guard`] - The status-transition guard
//! - [`sanitize`] - Comment cleanup and HTML escaping
//! - [`validation`] - Submission validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use statusguard_core::guard::{StatusGuard, TransitionDecision};
//! use statusguard_core::workflow::OrderWorkflow;
//! use statusguard_core::OrderState;
//!
//! let workflow = OrderWorkflow::standard();
//! let guard = StatusGuard::new(&workflow, false);
//!
//! assert_eq!(guard.check(OrderState::Processing, "fraud"), TransitionDecision::Allowed);
//! assert_eq!(guard.check(OrderState::Processing, "complete"), TransitionDecision::Rejected);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod guard;
pub mod sanitize;
pub mod scope;
pub mod types;
pub mod validation;
pub mod workflow;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use scope::ConfigScope;
pub use types::*;
pub use workflow::{OrderWorkflow, StatusDefinition};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// ACL resource an admin needs to add comments to orders.
pub const ADMIN_COMMENT_RESOURCE: &str = "sales::comment";

/// ACL resource an admin needs for a comment to trigger a customer email.
///
/// An admin without it can still comment; the notify flag is dropped.
pub const ADMIN_SALES_EMAIL_RESOURCE: &str = "sales::emails";

/// Entity name recorded on every order status history row.
pub const ORDER_ENTITY_NAME: &str = "order";
