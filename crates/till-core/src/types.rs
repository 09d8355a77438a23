//! # Domain Types
//!
//! Core domain types used throughout Till POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Product      │   │      Order      │   │     OrderItem       │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id             │◄──┼─────────────────┼───│  product_id (FK)    │   │
//! │  │  name           │   │  id             │◄──│  order_id (FK)      │   │
//! │  │  price_cents    │   │  total_cents    │   │  quantity           │   │
//! │  │  cost_cents     │   │  created_at     │   │  price_at_sale      │   │
//! │  │  stock_quantity │   │  business_date  │   │  cost_at_sale       │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │   DailySales    │   │   DailyProfit   │   read-only aggregates      │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `OrderItem` copies the product's price and cost at the moment of sale.
//! Later catalog changes never touch recorded sales or the profit reports.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Generated identifier.
    pub id: i64,

    /// Display name shown to cashier and on receipt.
    pub name: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Cost in cents (for profit calculations).
    pub cost_cents: i64,

    /// Current stock level.
    pub stock_quantity: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the unit cost as a Money type.
    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_cents(self.cost_cents)
    }

    /// Checks if the requested quantity is on hand.
    pub fn has_stock_for(&self, quantity: i64) -> bool {
        self.stock_quantity >= quantity
    }
}

/// Fields required to create a product (id and timestamps are generated).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price_cents: i64,
    pub cost_cents: i64,
    pub stock_quantity: i64,
}

// =============================================================================
// Order
// =============================================================================

/// A committed order. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Order {
    pub id: i64,
    /// Total as declared by the client at checkout.
    pub total_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    /// Store-local calendar date the order belongs to.
    #[ts(as = "String")]
    pub business_date: NaiveDate,
}

impl Order {
    /// Returns the declared total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Order Item
// =============================================================================

/// A line item in an order.
/// Uses snapshot pattern to freeze product data at time of sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    /// Unit price in cents at time of sale (frozen).
    pub price_at_sale_cents: i64,
    /// Unit cost in cents at time of sale (frozen).
    pub cost_at_sale_cents: i64,
}

/// Result of a committed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderReceipt {
    pub order_id: i64,
    /// Number of lines actually recorded.
    pub items_recorded: usize,
    /// Requested product ids that did not exist and were skipped.
    pub skipped_product_ids: Vec<i64>,
    /// Server-side Σ quantity × price_at_sale of the recorded lines.
    pub computed_total: Money,
}

// =============================================================================
// User
// =============================================================================

/// A cashier account. The password hash never leaves the server.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Reports
// =============================================================================

/// Sum of declared order totals for one business date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailySales {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub total_sales: Money,
}

/// Revenue, cost and profit of the line items sold on one business date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailyProfit {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub total_revenue: Money,
    pub total_cost: Money,
    pub total_profit: Money,
}

impl DailyProfit {
    /// Builds the report; profit is always exactly revenue - cost.
    pub fn new(date: NaiveDate, total_revenue: Money, total_cost: Money) -> Self {
        DailyProfit {
            date,
            total_revenue,
            total_cost,
            total_profit: total_revenue - total_cost,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn croissant(stock: i64) -> Product {
        let now = Utc::now();
        Product {
            id: 1,
            name: "Croissant".to_string(),
            price_cents: 325,
            cost_cents: 110,
            stock_quantity: stock,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_product_money_accessors() {
        let p = croissant(4);
        assert_eq!(p.price(), Money::from_cents(325));
        assert_eq!(p.cost(), Money::from_cents(110));
    }

    #[test]
    fn test_has_stock_for() {
        let p = croissant(3);
        assert!(p.has_stock_for(3));
        assert!(!p.has_stock_for(4));
    }

    #[test]
    fn test_daily_profit_reconciles() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let report = DailyProfit::new(date, Money::from_cents(1500), Money::from_cents(600));
        assert_eq!(report.total_profit.cents(), 900);
        assert_eq!(report.total_profit, report.total_revenue - report.total_cost);
    }
}
