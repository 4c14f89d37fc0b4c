//! # Database Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  sqlx::Error / MigrateError / CoreError (bad stored data)              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← categorized, with entity context              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (admin-api) ← rendered as JSON                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Admin sees "We cannot add order history." (details only in logs)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use statusguard_core::CoreError;
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// UNIQUE constraint violation, e.g. a duplicate order increment ID.
    #[error("Duplicate value for {field}")]
    UniqueViolation { field: String },

    /// FOREIGN KEY constraint violation.
    ///
    /// ## When This Occurs
    /// - History row for a non-existent order
    /// - Order placed in a non-existent store
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Database file could not be opened or the pool is closed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Embedded migration failed to apply.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Runtime SQL error.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// A stored value does not satisfy a domain rule
    /// (unknown state code, malformed status code).
    #[error("Invalid data: {0}")]
    InvalidData(#[from] CoreError),

    /// All connections in use past the acquire timeout.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Whether this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound { .. })
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → constraint kind from the SQLite message
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // "UNIQUE constraint failed: <table>.<column>"
                if let Some(field) = msg.strip_prefix("UNIQUE constraint failed: ") {
                    DbError::UniqueViolation {
                        field: field.to_string(),
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
