//! End-to-end tests driving the router with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use till_api::{build_router, AppState, JwtManager};
use till_core::{NewProduct, OrderPolicy, StoreCalendar, TotalPolicy};
use till_db::{Database, DbConfig};

const SECRET: &str = "test-secret";

struct TestApp {
    router: Router,
    db: Database,
}

async fn test_app_with_policy(policy: OrderPolicy) -> TestApp {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    db.users().create("cashier", "password123").await.unwrap();

    let state = AppState::new(
        db.clone(),
        Arc::new(JwtManager::new(SECRET, 3600)),
        policy,
        StoreCalendar::utc(),
    );

    TestApp {
        router: build_router(state),
        db,
    }
}

async fn test_app() -> TestApp {
    test_app_with_policy(OrderPolicy::default()).await
}

async fn add_product(db: &Database, name: &str, price_cents: i64, cost_cents: i64, stock: i64) -> i64 {
    db.products()
        .insert(&NewProduct {
            name: name.to_string(),
            price_cents,
            cost_cents,
            stock_quantity: stock,
        })
        .await
        .unwrap()
        .id
}

async fn send(
    app: &TestApp,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

async fn login(app: &TestApp) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"username": "cashier", "password": "password123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

// =============================================================================
// Login and the bearer gate
// =============================================================================

#[tokio::test]
async fn test_login_success() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"username": "cashier", "password": "password123"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "cashier");
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = test_app().await;

    let (wrong_pw, wrong_pw_body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"username": "cashier", "password": "nope"})),
    )
    .await;
    let (unknown, unknown_body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"username": "ghost", "password": "password123"})),
    )
    .await;

    assert_eq!(wrong_pw, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_pw_body, unknown_body);
    assert_eq!(wrong_pw_body["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn test_login_bad_input() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::POST, "/api/auth/login", None, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = test_app().await;

    for uri in ["/api/products", "/api/reports/daily_sales", "/api/reports/daily_profit", "/api/orders/1"] {
        let (status, body) = send(&app, Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["code"], "UNAUTHORIZED");
    }

    let (status, _) = send(&app, Method::GET, "/api/products", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_checked_before_body() {
    let app = test_app().await;

    let (status, _) = send(&app, Method::POST, "/api/orders", None, Some(json!({"items": "bogus"}))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let app = test_app().await;
    let expired = JwtManager::new(SECRET, -300).issue_token("cashier").unwrap();

    let (status, _) = send(&app, Method::GET, "/api/products", Some(&expired), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_from_other_secret_rejected() {
    let app = test_app().await;
    let forged = JwtManager::new("other-secret", 3600).issue_token("cashier").unwrap();

    let (status, _) = send(&app, Method::GET, "/api/products", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Catalog and orders
// =============================================================================

#[tokio::test]
async fn test_products_listed_by_name() {
    let app = test_app().await;
    add_product(&app.db, "Muffin", 350, 120, 20).await;
    add_product(&app.db, "Bagel", 350, 110, 25).await;
    let token = login(&app).await;

    let (status, body) = send(&app, Method::GET, "/api/products", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    let products = body.as_array().unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0]["name"], "Bagel");
    assert_eq!(products[0]["price"], 3.5);
    assert_eq!(products[0]["cost_price"], 1.1);
    assert_eq!(products[0]["stock_quantity"], 25);
    assert_eq!(products[1]["name"], "Muffin");
}

#[tokio::test]
async fn test_order_scenario() {
    let app = test_app().await;
    let product_a = add_product(&app.db, "A", 500, 200, 10).await;
    let token = login(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(&token),
        Some(json!({"items": [{"product_id": product_a, "quantity": 3}], "total_amount": 15.0})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Order created successfully");
    assert_eq!(body["skipped_product_ids"], json!([]));
    let order_id = body["order_id"].as_i64().unwrap();

    let product = app.db.products().get_by_id(product_a).await.unwrap().unwrap();
    assert_eq!(product.stock_quantity, 7);

    let (status, profit) = send(&app, Method::GET, "/api/reports/daily_profit", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profit["total_revenue"], 15.0);
    assert_eq!(profit["total_cost"], 6.0);
    assert_eq!(profit["total_profit"], 9.0);

    let (status, sales) = send(&app, Method::GET, "/api/reports/daily_sales", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(sales["total_sales"], 15.0);

    let (status, order) = send(&app, Method::GET, &format!("/api/orders/{}", order_id), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["order_id"], order_id);
    assert_eq!(order["total_amount"], 15.0);
    assert_eq!(order["items"][0]["quantity"], 3);
    assert_eq!(order["items"][0]["price_at_sale"], 5.0);
    assert_eq!(order["items"][0]["cost_at_sale"], 2.0);
}

#[tokio::test]
async fn test_unknown_product_is_skipped() {
    let app = test_app().await;
    let product = add_product(&app.db, "Coffee", 250, 70, 60).await;
    let token = login(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(&token),
        Some(json!({
            "items": [
                {"product_id": product, "quantity": 1},
                {"product_id": 9999, "quantity": 2}
            ],
            "total_amount": 2.5
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["skipped_product_ids"], json!([9999]));
}

#[tokio::test]
async fn test_insufficient_stock_conflict() {
    let app = test_app().await;
    let product = add_product(&app.db, "Salad", 900, 380, 2).await;
    let token = login(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(&token),
        Some(json!({"items": [{"product_id": product, "quantity": 3}], "total_amount": 27.0})),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INSUFFICIENT_STOCK");

    let stored = app.db.products().get_by_id(product).await.unwrap().unwrap();
    assert_eq!(stored.stock_quantity, 2);
    assert_eq!(app.db.orders().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_total_mismatch_under_verify_policy() {
    let app = test_app_with_policy(OrderPolicy {
        total: TotalPolicy::Verify,
        ..OrderPolicy::default()
    })
    .await;
    let product = add_product(&app.db, "Espresso", 450, 120, 40).await;
    let token = login(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(&token),
        Some(json!({"items": [{"product_id": product, "quantity": 2}], "total_amount": 1.0})),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "TOTAL_MISMATCH");
    assert_eq!(app.db.orders().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_invalid_order_bodies() {
    let app = test_app().await;
    let product = add_product(&app.db, "Croissant", 300, 110, 30).await;
    let token = login(&app).await;

    for body in [
        json!({"items": [{"product_id": product, "quantity": 0}], "total_amount": 0.0}),
        json!({"items": [{"product_id": product, "quantity": -2}], "total_amount": 0.0}),
        json!({"items": [{"product_id": product, "quantity": 1}], "total_amount": -3.0}),
        json!({"items": [{"product_id": "abc", "quantity": 1}]}),
    ] {
        let (status, _) = send(&app, Method::POST, "/api/orders", Some(&token), Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    }

    let stored = app.db.products().get_by_id(product).await.unwrap().unwrap();
    assert_eq!(stored.stock_quantity, 30);
}

#[tokio::test]
async fn test_get_missing_order() {
    let app = test_app().await;
    let token = login(&app).await;

    let (status, body) = send(&app, Method::GET, "/api/orders/424242", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = send(&app, Method::GET, "/api/orders/abc", Some(&token), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Reports
// =============================================================================

#[tokio::test]
async fn test_report_dates() {
    let app = test_app().await;
    let token = login(&app).await;

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/reports/daily_sales?date=2024-01-01",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["date"], "2024-01-01");
    assert_eq!(body["total_sales"], 0.0);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/reports/daily_profit?date=2024-01-01",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_profit"], 0.0);

    for uri in [
        "/api/reports/daily_sales?date=01/02/2024",
        "/api/reports/daily_profit?date=2024-13-40",
    ] {
        let (status, body) = send(&app, Method::GET, uri, Some(&token), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
}

// =============================================================================
// Health, fallback, CORS
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    app.db.close().await;

    let (status, body) = send(&app, Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["database"], "unavailable");
}

#[tokio::test]
async fn test_unknown_route() {
    let app = test_app().await;

    let (status, body) = send(&app, Method::GET, "/api/nope", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = test_app().await;

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/orders")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization,content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}
