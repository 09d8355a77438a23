//! HTTP routes.
//!
//! Every handler lives in the module named after its path segment. Routes
//! that take an [`AuthUser`](crate::auth::AuthUser) argument are protected;
//! login and health are public.

pub mod auth;
pub mod health;
pub mod orders;
pub mod products;
pub mod reports;

use axum::http::Uri;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::AppState;

/// Builds the complete router with CORS and request tracing.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/products", get(products::list_products))
        .route("/api/orders", post(orders::create_order))
        .route("/api/orders/{id}", get(orders::get_order))
        .route("/api/reports/daily_sales", get(reports::daily_sales))
        .route("/api/reports/daily_profit", get(reports::daily_profit))
        .route("/api/health", get(health::health))
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
