//! # Statusguard Admin API
//!
//! HTTP surface for adding comments to orders through the status guard.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Admin API Components                            │
//! │                                                                         │
//! │  ┌────────────────────┐  ┌─────────────────────┐  ┌──────────────────┐ │
//! │  │  routes            │  │  service            │  │  mailer          │ │
//! │  │                    │  │                     │  │                  │ │
//! │  │ • /health          │  │ • add_admin_comment │  │ • CommentSender  │ │
//! │  │ • add-comment      │─►│ • OrderComment-     │─►│ • OutboxComment- │ │
//! │  │   (admin form)     │  │   Service (REST)    │  │   Sender         │ │
//! │  │ • /rest/V1/orders/ │  │                     │  │                  │ │
//! │  │   {id}/comments    │  └─────────┬───────────┘  └────────┬─────────┘ │
//! │  └────────┬───────────┘            │                       │           │
//! │           │                        ▼                       ▼           │
//! │  ┌────────┴───────────┐  ┌──────────────────────────────────────────┐ │
//! │  │  auth              │  │  statusguard-db (SQLite)                 │ │
//! │  │  Bearer JWT ─►     │  │  orders, history, workflow, settings,   │ │
//! │  │  AdminIdentity     │  │  email outbox                            │ │
//! │  └────────────────────┘  └──────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `HTTP_BIND_ADDR` - Interface to bind (default: 0.0.0.0)
//! - `HTTP_PORT` - HTTP port (default: 8080)
//! - `DATABASE_PATH` - SQLite file (default: ./statusguard.db)
//! - `JWT_SECRET` - Secret for admin token signing
//! - `JWT_LIFETIME_SECS` - Admin token lifetime (default: 3600)
//! - `MAIL_FROM_ADDRESS` / `MAIL_FROM_NAME` - Sender of customer emails

pub mod auth;
pub mod config;
pub mod error;
pub mod mailer;
pub mod render;
pub mod routes;
pub mod service;
pub mod state;

// Re-exports
pub use config::AdminConfig;
pub use error::ApiError;
pub use state::AppState;
