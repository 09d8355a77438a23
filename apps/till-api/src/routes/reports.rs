//! Daily sales and profit reports.
//!
//! Both take an optional `date=YYYY-MM-DD`; without it they report the
//! store's current business day.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use till_core::validation::parse_report_date;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DailySalesView {
    pub date: NaiveDate,
    pub total_sales: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DailyProfitView {
    pub date: NaiveDate,
    pub total_revenue: f64,
    pub total_cost: f64,
    pub total_profit: f64,
}

fn report_date(
    state: &AppState,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Result<NaiveDate, ApiError> {
    let Query(query) = query?;
    match query.date {
        Some(raw) => Ok(parse_report_date(&raw)?),
        None => Ok(state.calendar.today()),
    }
}

/// `GET /api/reports/daily_sales`
pub async fn daily_sales(
    _user: AuthUser,
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Result<Json<DailySalesView>, ApiError> {
    let date = report_date(&state, query)?;
    let sales = state.db.reports().daily_sales(date).await?;

    debug!(date = %date, total = %sales.total_sales, "Daily sales report");

    Ok(Json(DailySalesView {
        date: sales.date,
        total_sales: sales.total_sales.to_decimal(),
    }))
}

/// `GET /api/reports/daily_profit`
pub async fn daily_profit(
    _user: AuthUser,
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Result<Json<DailyProfitView>, ApiError> {
    let date = report_date(&state, query)?;
    let profit = state.db.reports().daily_profit(date).await?;

    debug!(date = %date, profit = %profit.total_profit, "Daily profit report");

    Ok(Json(DailyProfitView {
        date: profit.date,
        total_revenue: profit.total_revenue.to_decimal(),
        total_cost: profit.total_cost.to_decimal(),
        total_profit: profit.total_profit.to_decimal(),
    }))
}
