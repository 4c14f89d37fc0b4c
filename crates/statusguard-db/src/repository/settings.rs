//! # Settings Repository
//!
//! Scoped configuration values stored in `core_config_data`.
//!
//! ## Resolution
//! ```text
//! get_value(path, Store(1))
//!     │
//!     ├── stores/1      value NULL or no row? ──┐
//!     │                                         ▼
//!     ├── websites/<website of store 1>  ───────┐
//!     │                                         ▼
//!     └── default/0  ───────────────────────────► value or None
//! ```
//! A row with a NULL value means "inherit" and never ends the search.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use statusguard_core::scope::is_flag_value;
use statusguard_core::ConfigScope;

/// Repository for scoped settings.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    /// Creates a new SettingsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    /// Resolves a value starting at `scope` and falling back outwards.
    pub async fn get_value(&self, path: &str, scope: ConfigScope) -> DbResult<Option<String>> {
        for candidate in self.fallback_chain(scope).await? {
            if let Some(value) = self.value_at(path, candidate).await? {
                debug!(
                    path = %path,
                    scope = candidate.code(),
                    scope_id = candidate.id(),
                    "Resolved setting"
                );
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// Resolves a value as a flag. Unset counts as off.
    pub async fn is_set_flag(&self, path: &str, scope: ConfigScope) -> DbResult<bool> {
        Ok(self
            .get_value(path, scope)
            .await?
            .is_some_and(|value| is_flag_value(&value)))
    }

    /// Writes a value at exactly `scope`. `None` stores NULL, which makes the
    /// scope inherit from its parent again.
    pub async fn set_value(
        &self,
        path: &str,
        value: Option<&str>,
        scope: ConfigScope,
    ) -> DbResult<()> {
        debug!(
            path = %path,
            scope = scope.code(),
            scope_id = scope.id(),
            "Writing setting"
        );

        sqlx::query(
            r#"
            INSERT INTO core_config_data (scope, scope_id, path, value, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT (scope, scope_id, path) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(scope.code())
        .bind(scope.id())
        .bind(path)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Value stored at exactly `scope`, NULL and missing both giving `None`.
    async fn value_at(&self, path: &str, scope: ConfigScope) -> DbResult<Option<String>> {
        let value: Option<Option<String>> = sqlx::query_scalar(
            "SELECT value FROM core_config_data WHERE scope = ?1 AND scope_id = ?2 AND path = ?3",
        )
        .bind(scope.code())
        .bind(scope.id())
        .bind(path)
        .fetch_optional(&self.pool)
        .await?;

        Ok(value.flatten())
    }

    /// Scopes to search, most specific first.
    async fn fallback_chain(&self, scope: ConfigScope) -> DbResult<Vec<ConfigScope>> {
        let chain = match scope {
            ConfigScope::Default => vec![ConfigScope::Default],
            ConfigScope::Website(id) => vec![ConfigScope::Website(id), ConfigScope::Default],
            ConfigScope::Store(id) => {
                let website: Option<i64> =
                    sqlx::query_scalar("SELECT website_id FROM store WHERE store_id = ?1")
                        .bind(id)
                        .fetch_optional(&self.pool)
                        .await?;

                let mut chain = vec![ConfigScope::Store(id)];
                chain.extend(website.map(ConfigScope::Website));
                chain.push(ConfigScope::Default);
                chain
            }
        };
        Ok(chain)
    }
}
