//! # Repository Module
//!
//! Database repository implementations for Till POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  axum handler                                                          │
//! │       │                                                                 │
//! │       │  state.db.orders().create_order(&request, stamp, policy)       │
//! │       ▼                                                                 │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────┐        │
//! │  │ ProductRepository│ │ OrderRepository  │ │ ReportRepository │        │
//! │  │  list_by_name    │ │  create_order    │ │  daily_sales     │        │
//! │  │  get_by_id       │ │  get_order       │ │  daily_profit    │        │
//! │  │  insert          │ │  get_items       │ │                  │        │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────┘        │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Catalog reads and inserts
//! - [`order::OrderRepository`] - The order transaction and order lookups
//! - [`report::ReportRepository`] - Daily sales and profit
//! - [`user::UserRepository`] - Cashier accounts

pub mod order;
pub mod product;
pub mod report;
pub mod user;
