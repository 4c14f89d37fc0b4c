//! In-process scenario tests for the admin API endpoints.
//!
//! Each test builds the router over an in-memory database and drives it via
//! `tower::ServiceExt::oneshot`, no network I/O required.

use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use statusguard_admin_api::auth::JwtManager;
use statusguard_admin_api::{routes, AdminConfig, AppState};
use statusguard_core::scope::CONFIG_PATH_ALLOW_ANY_ORDER_STATUS_CHANGE;
use statusguard_core::{ConfigScope, Order, OrderState};
use statusguard_db::{Database, DbConfig, NewOrder};
use tower::ServiceExt; // oneshot

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Harness {
    db: Database,
    router: axum::Router,
    jwt: JwtManager,
    order: Order,
}

async fn harness() -> Harness {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let order = db
        .orders()
        .insert(NewOrder {
            increment_id: "000000100".to_string(),
            state: OrderState::Processing,
            status: "processing".to_string(),
            store_id: 1,
            customer_email: Some("roni_cost@example.com".to_string()),
            customer_name: Some("Veronica Costello".to_string()),
        })
        .await
        .unwrap();

    let config = AdminConfig::default();
    let jwt = JwtManager::new(config.jwt_secret.clone(), config.jwt_lifetime_secs);
    let router = routes::build_router(Arc::new(AppState::new(db.clone(), config)));

    Harness {
        db,
        router,
        jwt,
        order,
    }
}

impl Harness {
    fn token(&self, resources: &[&str]) -> String {
        let resources: Vec<String> = resources.iter().map(|r| r.to_string()).collect();
        self.jwt.issue_token("admin", &resources).unwrap()
    }

    async fn call(&self, req: Request<Body>) -> (StatusCode, Option<String>, Bytes) {
        let resp = self.router.clone().oneshot(req).await.expect("oneshot failed");
        let status = resp.status();
        let location = resp
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = resp
            .into_body()
            .collect()
            .await
            .expect("body collect failed")
            .to_bytes();
        (status, location, body)
    }
}

fn admin_form(order_id: i64, token: &str, form: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/admin/sales/order/{}/add-comment", order_id))
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

fn rest_post(order_id: i64, token: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/rest/V1/orders/{}/comments", order_id))
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn parse_json(b: Bytes) -> serde_json::Value {
    serde_json::from_slice(&b).expect("body is not valid JSON")
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_returns_200_ok_true() {
    let h = harness().await;
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let (status, _, body) = h.call(req).await;
    assert_eq!(status, StatusCode::OK);

    let json = parse_json(body);
    assert_eq!(json["ok"], true);
    assert_eq!(json["service"], "statusguard-admin-api");
}

// ---------------------------------------------------------------------------
// POST /admin/sales/order/{id}/add-comment
// ---------------------------------------------------------------------------

#[tokio::test]
async fn admin_comment_renders_history_block() {
    let h = harness().await;
    let token = h.token(&["sales::comment"]);

    let (status, _, body) = h
        .call(admin_form(
            h.order.id,
            &token,
            "history%5Bcomment%5D=%3Cb%3EPacked%3C%2Fb%3E+and+ready&history%5Bstatus%5D=fraud",
        ))
        .await;
    assert_eq!(status, StatusCode::OK);

    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("order_history_block"));
    assert!(html.contains("Packed and ready"));
    assert!(html.contains("Suspected Fraud"));

    assert_eq!(h.db.orders().get(h.order.id).await.unwrap().status, "fraud");
}

#[tokio::test]
async fn admin_empty_comment_same_status_is_rejected() {
    let h = harness().await;
    let token = h.token(&["sales::comment"]);

    let (status, _, body) = h
        .call(admin_form(h.order.id, &token, "comment=&status=processing"))
        .await;
    assert_eq!(status, StatusCode::OK);

    let json = parse_json(body);
    assert_eq!(json["error"], true);
    assert_eq!(
        json["message"],
        "Please provide a comment text or update the order status to be able to submit a comment for this order."
    );
    assert!(h
        .db
        .status_history()
        .list_for_order(h.order.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn admin_status_of_other_state_keeps_current() {
    let h = harness().await;
    let token = h.token(&["sales::comment"]);

    let (status, _, _) = h
        .call(admin_form(h.order.id, &token, "comment=Closing&status=closed"))
        .await;
    assert_eq!(status, StatusCode::OK);

    let history = h.db.status_history().list_for_order(h.order.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status.as_deref(), Some("processing"));
}

#[tokio::test]
async fn admin_override_allows_any_status() {
    let h = harness().await;
    h.db.settings()
        .set_value(
            CONFIG_PATH_ALLOW_ANY_ORDER_STATUS_CHANGE,
            Some("1"),
            ConfigScope::Store(1),
        )
        .await
        .unwrap();
    let token = h.token(&["sales::comment"]);

    let (status, _, _) = h
        .call(admin_form(h.order.id, &token, "status=closed"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(h.db.orders().get(h.order.id).await.unwrap().status, "closed");
}

#[tokio::test]
async fn admin_notify_needs_email_resource() {
    let h = harness().await;

    let clerk = h.token(&["sales::comment"]);
    h.call(admin_form(
        h.order.id,
        &clerk,
        "comment=Shipped&is_customer_notified=1",
    ))
    .await;
    assert!(h.db.email_outbox().for_order(h.order.id).await.unwrap().is_empty());

    let manager = h.token(&["sales::comment", "sales::emails"]);
    h.call(admin_form(
        h.order.id,
        &manager,
        "comment=Shipped&is_customer_notified=1",
    ))
    .await;

    let queued = h.db.email_outbox().for_order(h.order.id).await.unwrap();
    assert_eq!(queued.len(), 1);
    assert_eq!(queued[0].recipient_email, "roni_cost@example.com");
}

#[tokio::test]
async fn admin_unreadable_form_returns_json_error() {
    let h = harness().await;
    let token = h.token(&["sales::comment"]);

    let (status, _, body) = h
        .call(admin_form(
            h.order.id,
            &token,
            "comment=a&history%5Bcomment%5D=b",
        ))
        .await;
    assert_eq!(status, StatusCode::OK);

    let json = parse_json(body);
    assert_eq!(json["error"], true);
    assert_eq!(json["message"], "We cannot add order history.");
    assert!(h
        .db
        .status_history()
        .list_for_order(h.order.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn admin_form_without_content_type_returns_json_error() {
    let h = harness().await;
    let token = h.token(&["sales::comment"]);
    let req = Request::builder()
        .method("POST")
        .uri(format!("/admin/sales/order/{}/add-comment", h.order.id))
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from("comment=hello"))
        .unwrap();

    let (status, _, body) = h.call(req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse_json(body)["error"], true);
}

#[tokio::test]
async fn admin_unknown_order_redirects_to_grid() {
    let h = harness().await;
    let token = h.token(&["sales::comment"]);

    let (status, location, _) = h.call(admin_form(404, &token, "comment=hello")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/admin/sales/order/"));
}

#[tokio::test]
async fn admin_without_comment_resource_is_forbidden() {
    let h = harness().await;
    let token = h.token(&["sales::emails"]);

    let (status, _, _) = h
        .call(admin_form(h.order.id, &token, "comment=hello"))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_without_token_is_unauthorized() {
    let h = harness().await;
    let req = Request::builder()
        .method("POST")
        .uri(format!("/admin/sales/order/{}/add-comment", h.order.id))
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("comment=hello"))
        .unwrap();

    let (status, _, _) = h.call(req).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// /rest/V1/orders/{id}/comments
// ---------------------------------------------------------------------------

#[tokio::test]
async fn rest_comment_returns_true() {
    let h = harness().await;
    let token = h.token(&["sales::comment"]);

    let (status, _, body) = h
        .call(rest_post(
            h.order.id,
            &token,
            serde_json::json!({
                "statusHistory": {
                    "comment": "Fraud check passed",
                    "status": "processing",
                    "is_customer_notified": 1
                }
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse_json(body), serde_json::json!(true));

    assert_eq!(h.db.email_outbox().for_order(h.order.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn rest_status_of_other_state_is_error() {
    let h = harness().await;
    let token = h.token(&["sales::comment"]);

    let (status, _, body) = h
        .call(rest_post(
            h.order.id,
            &token,
            serde_json::json!({ "statusHistory": { "status": "complete" } }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        parse_json(body)["message"],
        "Unable to add comment: The status \"complete\" is not part of the order status history."
    );
}

#[tokio::test]
async fn rest_unknown_order_is_404() {
    let h = harness().await;
    let token = h.token(&["sales::comment"]);

    let (status, _, _) = h
        .call(rest_post(
            404,
            &token,
            serde_json::json!({ "statusHistory": { "comment": "hi" } }),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rest_malformed_body_is_400() {
    let h = harness().await;
    let token = h.token(&["sales::comment"]);

    let (status, _, body) = h
        .call(rest_post(h.order.id, &token, serde_json::json!({ "comment": "hi" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(parse_json(body)["message"].is_string());
}

#[tokio::test]
async fn rest_list_comments_newest_first() {
    let h = harness().await;
    let token = h.token(&["sales::comment"]);

    for comment in ["first", "second"] {
        h.call(rest_post(
            h.order.id,
            &token,
            serde_json::json!({ "statusHistory": { "comment": comment } }),
        ))
        .await;
    }

    let req = Request::builder()
        .uri(format!("/rest/V1/orders/{}/comments", h.order.id))
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = h.call(req).await;
    assert_eq!(status, StatusCode::OK);

    let json = parse_json(body);
    let comments: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["comment"].as_str().unwrap())
        .collect();
    assert_eq!(comments, vec!["second", "first"]);
}
