//! # Report Repository
//!
//! Read-only daily aggregates over committed orders.
//!
//! Both reports bucket by `orders.business_date`, the store-local date
//! stamped when the order was placed. All sums are integer cents, so
//! `profit == revenue - cost` holds exactly.
//!
//! ```text
//! daily_sales(d)   = Σ orders.total_cents                    WHERE date = d
//! daily_profit(d)  = Σ qty × price_at_sale  (revenue)        WHERE date = d
//!                  - Σ qty × cost_at_sale   (cost)
//! ```

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use till_core::{DailyProfit, DailySales, Money};

/// Repository for the daily reports.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Sum of declared order totals for `date`; zero when there are none.
    pub async fn daily_sales(&self, date: NaiveDate) -> DbResult<DailySales> {
        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(total_cents), 0)
            FROM orders
            WHERE business_date = ?1
            "#,
        )
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        debug!(date = %date, total_cents = total, "Computed daily sales");

        Ok(DailySales {
            date,
            total_sales: Money::from_cents(total),
        })
    }

    /// Revenue, cost and profit of the items sold on `date`.
    pub async fn daily_profit(&self, date: NaiveDate) -> DbResult<DailyProfit> {
        let (revenue, cost): (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                COALESCE(SUM(oi.quantity * oi.price_at_sale_cents), 0),
                COALESCE(SUM(oi.quantity * oi.cost_at_sale_cents), 0)
            FROM order_items oi
            INNER JOIN orders o ON o.id = oi.order_id
            WHERE o.business_date = ?1
            "#,
        )
        .bind(date)
        .fetch_one(&self.pool)
        .await?;

        debug!(date = %date, revenue_cents = revenue, cost_cents = cost, "Computed daily profit");

        Ok(DailyProfit::new(
            date,
            Money::from_cents(revenue),
            Money::from_cents(cost),
        ))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
