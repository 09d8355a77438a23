//! Order placement and lookup.
//!
//! ```text
//! POST /api/orders {items:[{product_id, quantity}], total_amount}
//!        │
//!        ▼
//!   decimal total ──► Money (cents)
//!        │
//!        ▼
//!   OrderRepository::create_order   (one transaction: header, snapshots,
//!        │                           stock decrements; all or nothing)
//!        ▼
//!   201 {message, order_id, skipped_product_ids}
//! ```

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use till_core::{Money, OrderLine, OrderRequest};

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct OrderItemInput {
    pub product_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub items: Vec<OrderItemInput>,
    #[serde(default)]
    pub total_amount: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateOrderResponse {
    pub message: String,
    pub order_id: i64,
    pub skipped_product_ids: Vec<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderItemView {
    pub product_id: i64,
    pub quantity: i64,
    pub price_at_sale: f64,
    pub cost_at_sale: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderView {
    pub order_id: i64,
    pub created_at: DateTime<Utc>,
    pub business_date: NaiveDate,
    pub total_amount: f64,
    pub items: Vec<OrderItemView>,
}

/// `POST /api/orders`
pub async fn create_order(
    user: AuthUser,
    State(state): State<AppState>,
    body: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateOrderResponse>), ApiError> {
    let Json(body) = body?;

    let declared_total = Money::from_decimal("total_amount", body.total_amount)?;
    let lines = body
        .items
        .iter()
        .map(|item| OrderLine {
            product_id: item.product_id,
            quantity: item.quantity,
        })
        .collect();

    let request = OrderRequest::new(lines, declared_total);

    let receipt = state
        .db
        .orders()
        .create_order(&request, state.calendar.stamp_now(), state.order_policy)
        .await?;

    info!(
        username = %user.username,
        order_id = receipt.order_id,
        total = %declared_total,
        "Order placed"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateOrderResponse {
            message: "Order created successfully".to_string(),
            order_id: receipt.order_id,
            skipped_product_ids: receipt.skipped_product_ids,
        }),
    ))
}

/// `GET /api/orders/{id}`
pub async fn get_order(
    _user: AuthUser,
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<OrderView>, ApiError> {
    let Path(id) = id?;

    let order = state
        .db
        .orders()
        .get_order(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Order {} not found", id)))?;

    let items = state.db.orders().get_items(order.id).await?;

    Ok(Json(OrderView {
        order_id: order.id,
        created_at: order.created_at,
        business_date: order.business_date,
        total_amount: order.total().to_decimal(),
        items: items
            .into_iter()
            .map(|item| OrderItemView {
                product_id: item.product_id,
                quantity: item.quantity,
                price_at_sale: Money::from_cents(item.price_at_sale_cents).to_decimal(),
                cost_at_sale: Money::from_cents(item.cost_at_sale_cents).to_decimal(),
            })
            .collect(),
    }))
}
