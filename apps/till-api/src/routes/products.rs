//! Catalog listing.

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use till_core::Product;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;

/// A catalog row as the till renders it. Amounts are decimal major units.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProductView {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub cost_price: f64,
    pub stock_quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        ProductView {
            id: product.id,
            price: product.price().to_decimal(),
            cost_price: product.cost().to_decimal(),
            name: product.name,
            stock_quantity: product.stock_quantity,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// `GET /api/products`, ordered by name.
pub async fn list_products(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductView>>, ApiError> {
    let products = state.db.products().list_by_name().await?;

    debug!(username = %user.username, count = products.len(), "Listed products");

    Ok(Json(products.into_iter().map(ProductView::from).collect()))
}
