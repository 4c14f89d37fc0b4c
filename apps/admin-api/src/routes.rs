//! Axum router and all HTTP handlers for the admin API.
//!
//! `build_router` is the single entry point; `main.rs` calls it and attaches
//! the trace layer. Scenario tests in `tests/` drive the bare router.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        Path, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use statusguard_core::types::deserialize_optional_flag;
use statusguard_core::{StatusHistoryEntry, StatusHistoryPayload, ADMIN_COMMENT_RESOURCE};
use tracing::{error, warn};

use crate::auth::AdminIdentity;
use crate::error::ApiError;
use crate::render::render_history_block;
use crate::service::{add_admin_comment, AdminCommentRequest};
use crate::state::AppState;

/// Where the admin lands when the order can't be loaded.
pub const ORDER_GRID_PATH: &str = "/admin/sales/order/";

/// Service name reported by the health endpoint.
pub const SERVICE_NAME: &str = "statusguard-admin-api";

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the complete application router wired to the given shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/admin/sales/order/{order_id}/add-comment",
            post(admin_add_comment),
        )
        .route(
            "/rest/V1/orders/{order_id}/comments",
            post(rest_add_comment).get(rest_list_comments),
        )
        .with_state(state)
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub service: &'static str,
    pub database: bool,
}

pub(crate) async fn health(State(st): State<Arc<AppState>>) -> impl IntoResponse {
    let database = st.db.health_check().await;
    let status = if database {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            ok: database,
            service: SERVICE_NAME,
            database,
        }),
    )
}

// ---------------------------------------------------------------------------
// POST /admin/sales/order/{order_id}/add-comment
// ---------------------------------------------------------------------------

/// Admin order-view comment form.
///
/// Accepts both the order view's `history[...]` field names and bare ones.
#[derive(Debug, Default, Deserialize)]
pub struct AddCommentForm {
    #[serde(default, rename = "history[comment]", alias = "comment")]
    pub comment: Option<String>,

    #[serde(default, rename = "history[status]", alias = "status")]
    pub status: Option<String>,

    #[serde(
        default,
        rename = "history[is_customer_notified]",
        alias = "is_customer_notified",
        deserialize_with = "deserialize_optional_flag"
    )]
    pub is_customer_notified: Option<bool>,

    #[serde(
        default,
        rename = "history[is_visible_on_front]",
        alias = "is_visible_on_front",
        deserialize_with = "deserialize_optional_flag"
    )]
    pub is_visible_on_front: Option<bool>,
}

impl From<AddCommentForm> for AdminCommentRequest {
    fn from(form: AddCommentForm) -> Self {
        AdminCommentRequest {
            comment: form.comment,
            status: form.status,
            is_customer_notified: form.is_customer_notified.unwrap_or(false),
            is_visible_on_front: form.is_visible_on_front.unwrap_or(false),
        }
    }
}

/// Add a comment from the admin order view.
///
/// - Unknown order: `303` to the order grid.
/// - Success: the refreshed history block as HTML.
/// - Failure, including an unreadable form: `{"error": true, "message": ...}`.
pub(crate) async fn admin_add_comment(
    State(st): State<Arc<AppState>>,
    Path(order_id): Path<i64>,
    admin: AdminIdentity,
    form: Result<Form<AddCommentForm>, FormRejection>,
) -> Response {
    if let Err(e) = admin.require(ADMIN_COMMENT_RESOURCE) {
        return e.into_response();
    }

    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => return admin_error(ApiError::InvalidRequest(rejection.body_text())),
    };

    let order = match st.db.orders().find(order_id).await {
        Ok(Some(order)) => order,
        Ok(None) => {
            warn!(order_id, "Order not found, redirecting to order grid");
            return Redirect::to(ORDER_GRID_PATH).into_response();
        }
        Err(e) => return admin_error(e.into()),
    };

    let saved = add_admin_comment(
        &st.db,
        st.comment_sender.as_ref(),
        &admin,
        order,
        form.into(),
    )
    .await;

    match saved {
        Ok(_) => match history_block(&st, order_id).await {
            Ok(html) => Html(html).into_response(),
            Err(e) => admin_error(e),
        },
        Err(e) => admin_error(e),
    }
}

async fn history_block(st: &AppState, order_id: i64) -> Result<String, ApiError> {
    let order = st.db.orders().get(order_id).await?;
    let entries = st.db.status_history().list_for_order(order_id).await?;
    let workflow = st.db.workflow().load().await?;
    Ok(render_history_block(&order, &entries, workflow.as_ref()))
}

fn admin_error(err: ApiError) -> Response {
    if err.is_user_facing() {
        warn!(error = %err, "Order history not added");
    } else {
        error!(error = %err, "Failed to add order history");
    }
    (
        StatusCode::OK,
        Json(json!({ "error": true, "message": err.admin_message() })),
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// /rest/V1/orders/{order_id}/comments
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentBody {
    pub status_history: StatusHistoryPayload,
}

pub(crate) async fn rest_add_comment(
    State(st): State<Arc<AppState>>,
    Path(order_id): Path<i64>,
    admin: AdminIdentity,
    body: Result<Json<AddCommentBody>, JsonRejection>,
) -> Result<Json<bool>, ApiError> {
    admin.require(ADMIN_COMMENT_RESOURCE)?;

    let Json(body) = body.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;

    let added = st
        .comment_service
        .add_comment(order_id, body.status_history)
        .await?;
    Ok(Json(added))
}

pub(crate) async fn rest_list_comments(
    State(st): State<Arc<AppState>>,
    Path(order_id): Path<i64>,
    admin: AdminIdentity,
) -> Result<Json<Vec<StatusHistoryEntry>>, ApiError> {
    admin.require(ADMIN_COMMENT_RESOURCE)?;
    Ok(Json(st.comment_service.get_comments_list(order_id).await?))
}
