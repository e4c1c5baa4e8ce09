//! HTTP API integration tests.
//!
//! Drives the full stack (router -> service -> SQLite repository) through
//! tower's `oneshot` without binding a socket.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use commerce_hex::{CommerceService, inbound::HttpServer};
use commerce_repo::SqliteRepo;

async fn app() -> Router {
    let repo = SqliteRepo::new("sqlite::memory:").await.unwrap();
    let service = CommerceService::new(repo);
    HttpServer::new(service).router()
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, req).await
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn register_member(app: &Router, email: &str) -> Value {
    let (status, body) = post_json(
        app,
        "/api/members",
        json!({"name": "Alice", "email": email}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

async fn create_order(app: &Router, member_id: &str, amount: f64) -> Value {
    let (status, body) = post_json(
        app,
        "/api/orders",
        json!({"member_id": member_id, "amount": amount}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn test_health() {
    let app = app().await;

    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = app().await;

    let (status, body) = get(&app, "/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Commerce Service API");
}

#[tokio::test]
async fn test_full_payment_flow() {
    let app = app().await;

    let member = register_member(&app, "alice@example.com").await;
    let member_id = member["id"].as_str().unwrap().to_string();

    let order = create_order(&app, &member_id, 50000.0).await;
    assert_eq!(order["status"], "CREATED");
    assert_eq!(order["amount"], 50000.0);
    let order_id = order["id"].as_str().unwrap().to_string();

    let (status, payment) = post_json(
        &app,
        "/api/payments",
        json!({"order_id": order_id, "amount": 50000.0, "method": "CARD"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(payment["status"], "REQUESTED");
    assert_eq!(payment["method"], "CARD");
    assert!(payment.get("approved_at").is_none());
    let payment_id = payment["id"].as_str().unwrap().to_string();

    let (status, approved) =
        post_json(&app, &format!("/api/payments/{payment_id}/approve"), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["status"], "APPROVED");
    assert!(approved["approved_at"].is_string());

    // Order was completed in the same transaction, amount unchanged.
    let (status, order) = get(&app, &format!("/api/orders/{order_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["status"], "PAID");
    assert_eq!(order["amount"], 50000.0);

    // Reverse traversals are query-backed.
    let (status, orders) = get(&app, &format!("/api/members/{member_id}/orders")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(orders.as_array().unwrap().len(), 1);

    let (status, by_order) = get(&app, &format!("/api/orders/{order_id}/payment")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_order["id"].as_str().unwrap(), payment_id);
}

#[tokio::test]
async fn test_duplicate_email_returns_conflict() {
    let app = app().await;

    register_member(&app, "alice@example.com").await;

    let (status, body) = post_json(
        &app,
        "/api/members",
        json!({"name": "Other Alice", "email": "alice@example.com"}),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 409);
}

#[tokio::test]
async fn test_create_order_validation_errors() {
    let app = app().await;

    let member = register_member(&app, "alice@example.com").await;
    let member_id = member["id"].as_str().unwrap().to_string();

    let (status, _) = post_json(
        &app,
        "/api/orders",
        json!({"member_id": member_id, "amount": -0.01}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(
        &app,
        "/api/orders",
        json!({"member_id": uuid::Uuid::new_v4().to_string(), "amount": 100.0}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, order) = post_json(
        &app,
        "/api/orders",
        json!({"member_id": member_id, "amount": 0.0}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["amount"], 0.0);
}

#[tokio::test]
async fn test_payment_amount_mismatch_returns_bad_request() {
    let app = app().await;

    let member = register_member(&app, "alice@example.com").await;
    let member_id = member["id"].as_str().unwrap().to_string();
    let order = create_order(&app, &member_id, 10000.0).await;
    let order_id = order["id"].as_str().unwrap().to_string();

    let (status, body) = post_json(
        &app,
        "/api/payments",
        json!({"order_id": order_id, "amount": 9999.0, "method": "CARD"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn test_second_payment_returns_conflict() {
    let app = app().await;

    let member = register_member(&app, "alice@example.com").await;
    let member_id = member["id"].as_str().unwrap().to_string();
    let order = create_order(&app, &member_id, 100.0).await;
    let order_id = order["id"].as_str().unwrap().to_string();

    let payment = json!({"order_id": order_id, "amount": 100.0, "method": "CARD"});
    let (status, _) = post_json(&app, "/api/payments", payment.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = post_json(&app, "/api/payments", payment).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_approve_twice_returns_conflict() {
    let app = app().await;

    let member = register_member(&app, "alice@example.com").await;
    let member_id = member["id"].as_str().unwrap().to_string();
    let order = create_order(&app, &member_id, 42000.0).await;
    let order_id = order["id"].as_str().unwrap().to_string();

    let (_, payment) = post_json(
        &app,
        "/api/payments",
        json!({"order_id": order_id, "amount": 42000.0, "method": "BANK_TRANSFER"}),
    )
    .await;
    let payment_id = payment["id"].as_str().unwrap().to_string();

    let (status, _) =
        post_json(&app, &format!("/api/payments/{payment_id}/approve"), json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) =
        post_json(&app, &format!("/api/payments/{payment_id}/approve"), json!({})).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, order) = get(&app, &format!("/api/orders/{order_id}")).await;
    assert_eq!(order["status"], "PAID");
}

#[tokio::test]
async fn test_lookup_errors() {
    let app = app().await;

    let (status, _) = get(&app, "/api/members/not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let missing = uuid::Uuid::new_v4();
    let (status, _) = get(&app, &format!("/api/members/{missing}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&app, &format!("/api/orders/{missing}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&app, &format!("/api/payments/{missing}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
