//! # Order Workflow
//!
//! The state → valid-statuses mapping the guard checks against.
//!
//! ```text
//! ┌──────────────────┬──────────────────────────────────────┐
//! │ State            │ Statuses (stock assignments)          │
//! ├──────────────────┼──────────────────────────────────────┤
//! │ new              │ pending*                              │
//! │ pending_payment  │ pending_payment*                      │
//! │ processing       │ processing*, fraud                    │
//! │ complete         │ complete*                             │
//! │ closed           │ closed*                               │
//! │ canceled         │ canceled*                             │
//! │ holded           │ holded*                               │
//! │ payment_review   │ payment_review*, fraud                │
//! └──────────────────┴──────────────────────────────────────┘
//!                                        * = default for the state
//! ```
//!
//! A status can belong to several states. Custom statuses are added by
//! assigning them to a state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::OrderState;

/// One status as assigned to one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDefinition {
    pub status: String,
    pub label: String,
    pub is_default: bool,
    pub visible_on_front: bool,
}

impl StatusDefinition {
    pub fn new(status: impl Into<String>, label: impl Into<String>) -> Self {
        StatusDefinition {
            status: status.into(),
            label: label.into(),
            is_default: false,
            visible_on_front: true,
        }
    }

    /// Marks this status as the state's default.
    pub fn default_for_state(mut self) -> Self {
        self.is_default = true;
        self
    }
}

/// State → statuses mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderWorkflow {
    states: BTreeMap<OrderState, Vec<StatusDefinition>>,
}

impl OrderWorkflow {
    /// Creates an empty workflow. Every status is rejected against it.
    pub fn new() -> Self {
        OrderWorkflow::default()
    }

    /// The stock status assignments.
    pub fn standard() -> Self {
        let mut workflow = OrderWorkflow::new();
        let stock = [
            (OrderState::New, "pending", "Pending", true),
            (OrderState::PendingPayment, "pending_payment", "Pending Payment", true),
            (OrderState::Processing, "processing", "Processing", true),
            (OrderState::Processing, "fraud", "Suspected Fraud", false),
            (OrderState::Complete, "complete", "Complete", true),
            (OrderState::Closed, "closed", "Closed", true),
            (OrderState::Canceled, "canceled", "Canceled", true),
            (OrderState::Holded, "holded", "On Hold", true),
            (OrderState::PaymentReview, "payment_review", "Payment Review", true),
            (OrderState::PaymentReview, "fraud", "Suspected Fraud", false),
        ];
        for (state, status, label, is_default) in stock {
            let mut definition = StatusDefinition::new(status, label);
            definition.is_default = is_default;
            workflow.assign(state, definition);
        }
        workflow
    }

    /// Assigns a status to a state, replacing an existing assignment of the
    /// same status. A new default demotes the previous one.
    pub fn assign(&mut self, state: OrderState, definition: StatusDefinition) {
        let statuses = self.states.entry(state).or_default();
        if definition.is_default {
            for existing in statuses.iter_mut() {
                existing.is_default = false;
            }
        }
        match statuses.iter_mut().find(|d| d.status == definition.status) {
            Some(existing) => *existing = definition,
            None => statuses.push(definition),
        }
    }

    /// Statuses registered under `state`. Empty when none are.
    pub fn state_statuses(&self, state: OrderState) -> &[StatusDefinition] {
        self.states.get(&state).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `status` is registered under `state`.
    pub fn contains(&self, state: OrderState, status: &str) -> bool {
        self.state_statuses(state).iter().any(|d| d.status == status)
    }

    /// The default status of `state`, if one is marked.
    pub fn default_status(&self, state: OrderState) -> Option<&str> {
        self.state_statuses(state)
            .iter()
            .find(|d| d.is_default)
            .map(|d| d.status.as_str())
    }

    /// Label of a status in whichever state it is assigned to.
    pub fn status_label(&self, status: &str) -> Option<&str> {
        self.states
            .values()
            .flatten()
            .find(|d| d.status == status)
            .map(|d| d.label.as_str())
    }

    /// True when no status is assigned to any state.
    pub fn is_empty(&self) -> bool {
        self.states.values().all(Vec::is_empty)
    }
}
