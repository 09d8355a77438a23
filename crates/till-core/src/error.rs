//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  till-core errors (this file)                                          │
//! │  ├── CoreError        - Business rule rejections                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  till-db errors (separate crate)                                       │
//! │  └── DbError          - Database / transaction failures                │
//! │                                                                         │
//! │  till-api errors                                                       │
//! │  └── ApiError         - What the HTTP client sees                      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Client       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, amounts)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to one HTTP status

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule rejections raised while placing an order.
///
/// Any of these aborts the order transaction; nothing the order wrote
/// survives.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A line total or the running order total left the `i64` cent range.
    ///
    /// ## When This Occurs
    /// - A product row holds a price beyond `MAX_PRICE_CENTS`
    ///   (written outside the catalog repository)
    #[error("Order amount overflows at product #{product_id}")]
    AmountOverflow { product_id: i64 },

    /// Insufficient stock to complete the order.
    ///
    /// ## When This Occurs
    /// - Stock policy is `Enforce`
    /// - The conditional stock update matched no row
    ///
    /// ## User Workflow
    /// ```text
    /// Order: Croissant × 5
    ///      │
    ///      ▼
    /// UPDATE ... WHERE stock_quantity >= 5   (stock is 3)
    ///      │
    ///      ▼
    /// InsufficientStock { name: "Croissant", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// Rollback, client sees 409
    /// ```
    #[error("Insufficient stock for {name} (#{product_id}): available {available}, requested {requested}")]
    InsufficientStock {
        product_id: i64,
        name: String,
        available: i64,
        requested: i64,
    },

    /// Declared total does not match the recorded lines.
    ///
    /// Only raised when the total policy is `Verify`.
    #[error("Declared total {declared} does not match line items total {computed}")]
    TotalMismatch { declared: Money, computed: Money },

    /// Order has exceeded maximum allowed lines.
    #[error("Order cannot have more than {max} lines")]
    OrderTooLarge { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when client input doesn't meet requirements.
/// Used for early validation before any transaction is opened.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid date, non-finite number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
