//! # Status-Transition Guard
//!
//! Decides which status a comment may set on an order.
//!
//! ## Decision
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  requested status T, order state S, override flag                      │
//! │       │                                                                 │
//! │       ├── override set?            → AllowedByOverride                  │
//! │       │                                                                 │
//! │       ├── T ∈ statuses(S)?         → Allowed                            │
//! │       │                                                                 │
//! │       └── otherwise                → Rejected                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Call Sites, Two Rejection Policies
//! - Interactive admin action: [`StatusGuard::resolve_or_keep`] falls back
//!   to the order's existing status.
//! - Programmatic comment service: [`StatusGuard::resolve_strict`] fails
//!   with [`CoreError::StatusNotInState`].

use crate::error::{CoreError, CoreResult};
use crate::types::{Order, OrderState};
use crate::workflow::OrderWorkflow;

/// Outcome of a membership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDecision {
    /// The status is registered under the order's state.
    Allowed,
    /// The override flag is set; membership was not checked.
    AllowedByOverride,
    /// The status is not registered under the order's state.
    Rejected,
}

impl TransitionDecision {
    #[inline]
    pub fn is_allowed(&self) -> bool {
        !matches!(self, TransitionDecision::Rejected)
    }
}

/// The guard, bound to a workflow and the override flag in effect.
#[derive(Debug, Clone, Copy)]
pub struct StatusGuard<'a> {
    workflow: &'a OrderWorkflow,
    allow_any_status_change: bool,
}

impl<'a> StatusGuard<'a> {
    pub fn new(workflow: &'a OrderWorkflow, allow_any_status_change: bool) -> Self {
        StatusGuard {
            workflow,
            allow_any_status_change,
        }
    }

    /// Checks whether `requested` may be applied to an order in `state`.
    pub fn check(&self, state: OrderState, requested: &str) -> TransitionDecision {
        if self.allow_any_status_change {
            return TransitionDecision::AllowedByOverride;
        }
        if self.workflow.contains(state, requested) {
            TransitionDecision::Allowed
        } else {
            TransitionDecision::Rejected
        }
    }

    /// Interactive policy: the requested status, or the order's current one
    /// when the requested status is rejected.
    pub fn resolve_or_keep(&self, order: &Order, requested: &str) -> String {
        if self.check(order.state, requested).is_allowed() {
            requested.to_string()
        } else {
            order.status.clone()
        }
    }

    /// Programmatic policy.
    ///
    /// A missing or empty `requested` keeps the current status without any
    /// check. A rejected status is an error naming it.
    pub fn resolve_strict(&self, order: &Order, requested: Option<&str>) -> CoreResult<String> {
        let requested = match requested.filter(|s| !s.is_empty()) {
            Some(requested) => requested,
            None => return Ok(order.status.clone()),
        };

        if self.check(order.state, requested).is_allowed() {
            Ok(requested.to_string())
        } else {
            Err(CoreError::StatusNotInState {
                status: requested.to_string(),
            })
        }
    }
}

/// Entry point of the interactive path.
///
/// With no workflow configuration available at all, the requested status is
/// taken as-is.
pub fn resolve_admin_status(
    workflow: Option<&OrderWorkflow>,
    allow_any_status_change: bool,
    order: &Order,
    requested: &str,
) -> String {
    match workflow {
        Some(workflow) => {
            StatusGuard::new(workflow, allow_any_status_change).resolve_or_keep(order, requested)
        }
        None => requested.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn order(state: OrderState, status: &str) -> Order {
        let now = Utc::now();
        Order {
            id: 1,
            increment_id: "000000001".to_string(),
            state,
            status: status.to_string(),
            store_id: 1,
            customer_email: Some("jane@example.com".to_string()),
            customer_name: Some("Jane Roe".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Every status code known to the stock workflow plus one unknown.
    fn all_statuses() -> Vec<&'static str> {
        vec![
            "pending",
            "pending_payment",
            "processing",
            "fraud",
            "complete",
            "closed",
            "canceled",
            "holded",
            "payment_review",
            "pending_shipment",
        ]
    }

    #[test]
    fn test_check_matches_membership_for_every_state_and_status() {
        let workflow = OrderWorkflow::standard();
        let guard = StatusGuard::new(&workflow, false);

        for state in OrderState::ALL {
            for status in all_statuses() {
                let decision = guard.check(state, status);
                assert_eq!(
                    decision.is_allowed(),
                    workflow.contains(state, status),
                    "state={state} status={status}"
                );
            }
        }
    }

    #[test]
    fn test_override_accepts_everything() {
        let workflow = OrderWorkflow::standard();
        let guard = StatusGuard::new(&workflow, true);

        for state in OrderState::ALL {
            for status in all_statuses() {
                assert_eq!(
                    guard.check(state, status),
                    TransitionDecision::AllowedByOverride
                );
            }
        }

        // Even against an empty workflow.
        let empty = OrderWorkflow::new();
        let guard = StatusGuard::new(&empty, true);
        assert!(guard.check(OrderState::New, "anything").is_allowed());
    }

    #[test]
    fn test_resolve_or_keep_falls_back_silently() {
        let workflow = OrderWorkflow::standard();
        let guard = StatusGuard::new(&workflow, false);
        let order = order(OrderState::Processing, "processing");

        assert_eq!(guard.resolve_or_keep(&order, "fraud"), "fraud");
        assert_eq!(guard.resolve_or_keep(&order, "complete"), "processing");
    }

    #[test]
    fn test_resolve_strict_names_rejected_status() {
        let workflow = OrderWorkflow::standard();
        let guard = StatusGuard::new(&workflow, false);
        let order = order(OrderState::Processing, "processing");

        assert_eq!(guard.resolve_strict(&order, Some("fraud")).unwrap(), "fraud");

        let err = guard.resolve_strict(&order, Some("complete")).unwrap_err();
        assert!(matches!(err, CoreError::StatusNotInState { ref status } if status == "complete"));
        assert!(err.to_string().contains("\"complete\""));
    }

    #[test]
    fn test_resolve_strict_without_status_keeps_current() {
        let workflow = OrderWorkflow::new();
        let guard = StatusGuard::new(&workflow, false);
        let order = order(OrderState::Processing, "processing");

        assert_eq!(guard.resolve_strict(&order, None).unwrap(), "processing");
        assert_eq!(guard.resolve_strict(&order, Some("")).unwrap(), "processing");
    }

    #[test]
    fn test_resolve_strict_with_override() {
        let workflow = OrderWorkflow::standard();
        let guard = StatusGuard::new(&workflow, true);
        let order = order(OrderState::New, "pending");

        assert_eq!(
            guard.resolve_strict(&order, Some("complete")).unwrap(),
            "complete"
        );
    }

    #[test]
    fn test_admin_status_without_workflow_accepts_requested() {
        let order = order(OrderState::New, "pending");
        assert_eq!(resolve_admin_status(None, false, &order, "complete"), "complete");

        let workflow = OrderWorkflow::standard();
        assert_eq!(
            resolve_admin_status(Some(&workflow), false, &order, "complete"),
            "pending"
        );
        assert_eq!(
            resolve_admin_status(Some(&workflow), true, &order, "complete"),
            "complete"
        );
    }
}
