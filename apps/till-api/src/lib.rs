//! # Till API
//!
//! HTTP/JSON server for the browser till.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Till API Routes                                │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  auth          │  │  products      │  │  orders                    ││
//! │  │                │  │                │  │                            ││
//! │  │ • POST login   │  │ • GET list     │  │ • POST create (transaction)││
//! │  │   (public)     │  │                │  │ • GET by id                ││
//! │  └────────────────┘  └────────────────┘  └────────────────────────────┘│
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐                                │
//! │  │  reports       │  │  health        │                                │
//! │  │                │  │                │                                │
//! │  │ • daily_sales  │  │ • GET (public) │                                │
//! │  │ • daily_profit │  │                │                                │
//! │  └────────────────┘  └────────────────┘                                │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                      AppState (cloned per request)                │  │
//! │  │  Database (SqlitePool) • JwtManager • OrderPolicy • StoreCalendar │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config::AppConfig`] for the environment variables.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::extract::FromRef;
use till_core::{OrderPolicy, StoreCalendar};
use till_db::Database;

// Re-exports
pub use auth::{AuthUser, JwtManager};
pub use config::AppConfig;
pub use error::ApiError;
pub use routes::build_router;

/// Default `RUST_LOG` filter for the server binary.
pub const DEFAULT_LOG_FILTER: &str = "info,till_api=debug,till_db=debug,tower_http=debug,sqlx=warn";

/// Shared application state, built once at startup.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub jwt: Arc<JwtManager>,
    pub order_policy: OrderPolicy,
    pub calendar: StoreCalendar,
}

impl AppState {
    pub fn new(
        db: Database,
        jwt: Arc<JwtManager>,
        order_policy: OrderPolicy,
        calendar: StoreCalendar,
    ) -> Self {
        AppState {
            db,
            jwt,
            order_policy,
            calendar,
        }
    }

    /// State for a loaded configuration and an open database.
    pub fn from_config(config: &AppConfig, db: Database) -> Self {
        AppState::new(
            db,
            Arc::new(JwtManager::new(
                &config.jwt_secret,
                config.jwt_access_lifetime_secs,
            )),
            config.order_policy,
            config.calendar,
        )
    }
}

impl FromRef<AppState> for Arc<JwtManager> {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}
