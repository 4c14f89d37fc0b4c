//! # statusguard-db: Database Layer for the Order Status Guard
//!
//! This crate provides database access for the status guard. It uses SQLite
//! with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Statusguard Data Flow                            │
//! │                                                                         │
//! │  admin-api handler (add-comment)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   statusguard-db (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │    │  (embedded)  │  │   │
//! │  │   │               │    │ OrderRepo      │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ HistoryRepo    │    │ 0001_schema  │  │   │
//! │  │   │ Connection    │    │ WorkflowRepo   │    │ 0002_stock   │  │   │
//! │  │   │ Management    │    │ SettingsRepo   │    │              │  │   │
//! │  │   │               │    │ OutboxRepo     │    │              │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (WAL mode)                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use statusguard_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/statusguard.db")).await?;
//!
//! let order = db.orders().get(42).await?;
//! let workflow = db.workflow().load().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::history::StatusHistoryRepository;
pub use repository::order::{NewOrder, OrderRepository};
pub use repository::outbox::EmailOutboxRepository;
pub use repository::settings::SettingsRepository;
pub use repository::workflow::WorkflowRepository;
