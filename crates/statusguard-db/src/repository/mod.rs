//! # Repository Module
//!
//! Database repository implementations for the status guard.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repositories and Their Tables                        │
//! │                                                                         │
//! │  admin-api service                                                     │
//! │       │                                                                 │
//! │       │  db.orders().get(42)                                           │
//! │       ▼                                                                 │
//! │  OrderRepository ─────────── sales_order                               │
//! │  │  └── save_with_history ── + sales_order_status_history (one tx)     │
//! │  StatusHistoryRepository ─── sales_order_status_history                │
//! │  WorkflowRepository ──────── sales_order_status                        │
//! │                              sales_order_status_state                  │
//! │  SettingsRepository ──────── core_config_data (+ store for fallback)   │
//! │  EmailOutboxRepository ───── email_outbox                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every repository holds a clone of the pool and is created on demand
//! through the accessors on [`crate::Database`].

pub mod history;
pub mod order;
pub mod outbox;
pub mod settings;
pub mod workflow;
