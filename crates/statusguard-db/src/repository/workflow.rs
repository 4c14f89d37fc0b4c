//! # Workflow Repository
//!
//! Loads and edits the state → statuses mapping stored in
//! `sales_order_status` (labels) and `sales_order_status_state` (assignments).

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use statusguard_core::validation::validate_status_code;
use statusguard_core::{CoreError, OrderState, OrderWorkflow, StatusDefinition};

/// One row of the assignment join.
type AssignmentRow = (String, String, String, bool, bool);

/// Repository for order status workflow configuration.
#[derive(Debug, Clone)]
pub struct WorkflowRepository {
    pool: SqlitePool,
}

impl WorkflowRepository {
    /// Creates a new WorkflowRepository.
    pub fn new(pool: SqlitePool) -> Self {
        WorkflowRepository { pool }
    }

    /// Loads the workflow.
    ///
    /// Returns `None` when no status is assigned to any state, meaning
    /// the installation has no workflow configuration at all.
    ///
    /// ## Errors
    /// `InvalidData` if an assignment names a state code this build
    /// doesn't know.
    pub async fn load(&self) -> DbResult<Option<OrderWorkflow>> {
        let rows = sqlx::query_as::<_, AssignmentRow>(
            r#"
            SELECT
                a.state,
                a.status,
                s.label,
                a.is_default,
                a.visible_on_front
            FROM sales_order_status_state a
            JOIN sales_order_status s ON s.status = a.status
            ORDER BY a.state, a.is_default DESC, a.status
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Ok(None);
        }

        let mut workflow = OrderWorkflow::new();
        for (state, status, label, is_default, visible_on_front) in rows {
            let state: OrderState = state.parse()?;
            workflow.assign(
                state,
                StatusDefinition {
                    status,
                    label,
                    is_default,
                    visible_on_front,
                },
            );
        }

        debug!("Order workflow loaded");
        Ok(Some(workflow))
    }

    /// Creates or relabels a status and assigns it to `state`.
    ///
    /// Marking it default demotes the state's previous default.
    pub async fn assign(&self, state: OrderState, definition: &StatusDefinition) -> DbResult<()> {
        validate_status_code(&definition.status).map_err(CoreError::from)?;

        info!(
            state = %state,
            status = %definition.status,
            is_default = definition.is_default,
            "Assigning order status"
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO sales_order_status (status, label) VALUES (?1, ?2)
            ON CONFLICT (status) DO UPDATE SET label = excluded.label
            "#,
        )
        .bind(&definition.status)
        .bind(&definition.label)
        .execute(&mut *tx)
        .await?;

        if definition.is_default {
            sqlx::query("UPDATE sales_order_status_state SET is_default = 0 WHERE state = ?1")
                .bind(state.as_str())
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query(
            r#"
            INSERT INTO sales_order_status_state (status, state, is_default, visible_on_front)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT (status, state) DO UPDATE SET
                is_default = excluded.is_default,
                visible_on_front = excluded.visible_on_front
            "#,
        )
        .bind(&definition.status)
        .bind(state.as_str())
        .bind(definition.is_default)
        .bind(definition.visible_on_front)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Removes a status from `state`. The status label is kept.
    pub async fn unassign(&self, state: OrderState, status: &str) -> DbResult<()> {
        let result =
            sqlx::query("DELETE FROM sales_order_status_state WHERE state = ?1 AND status = ?2")
                .bind(state.as_str())
                .bind(status)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(
                "Status assignment",
                format!("{state}/{status}"),
            ));
        }

        info!(state = %state, status = %status, "Unassigned order status");
        Ok(())
    }

    /// Removes every assignment, leaving the installation unconfigured.
    pub async fn clear_assignments(&self) -> DbResult<()> {
        sqlx::query("DELETE FROM sales_order_status_state")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
