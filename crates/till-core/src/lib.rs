//! # till-core: Pure Business Logic for Till POS
//!
//! This crate holds the domain model of the coffee-shop till: products,
//! orders and their line items, money, validation rules and the store
//! calendar used to bucket orders into business days. It has zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Till POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web Frontend (React)                         │   │
//! │  │     Login ──► Product Grid ──► Cart ──► Checkout ──► Reports    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP + JSON (Bearer token)             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    till-api (axum)                              │   │
//! │  │       login, list_products, create_order, daily reports         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   order   │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │  policies │  │   rules   │  │   │
//! │  │   │   Order   │  │           │  │  totals   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    till-db (Database Layer)                     │   │
//! │  │        SQLite, order transaction, reports, credentials          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Order, OrderItem, reports)
//! - [`money`] - Money type with integer arithmetic
//! - [`order`] - Order request, stock/total policies, total reconciliation
//! - [`calendar`] - Store-local business dates
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::money::Money;
//!
//! let espresso = Money::from_cents(350); // $3.50
//! let line = espresso.checked_multiply_quantity(2);
//! assert_eq!(line, Some(Money::from_cents(700)));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calendar;
pub mod error;
pub mod money;
pub mod order;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calendar::{OrderStamp, StoreCalendar};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use order::{OrderLine, OrderPolicy, OrderRequest, StockPolicy, TotalPolicy};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed in a single order.
///
/// ## Business Reason
/// Prevents runaway requests from holding the write lock for long.
pub const MAX_ORDER_LINES: usize = 100;

/// Maximum quantity of a single line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10)
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum unit price or cost of a product, in cents (one million dollars).
///
/// ## Business Reason
/// Keeps every line total and order total far inside `i64`.
pub const MAX_PRICE_CENTS: i64 = 100_000_000;
