//! # Order Rules
//!
//! The pure half of order placement: what a request looks like, which
//! policies govern stock and declared totals, and how the declared total is
//! reconciled against the recorded lines. The transactional half lives in
//! `till-db` (`OrderRepository::create_order`).
//!
//! ## Policy Matrix
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  StockPolicy::Enforce        stock may never drop below zero;          │
//! │  (default)                   the order is rejected and rolled back     │
//! │                                                                         │
//! │  StockPolicy::AllowNegative  stock is decremented unconditionally      │
//! │                                                                         │
//! │  TotalPolicy::Trust          declared total is stored as sent;         │
//! │  (default)                   a mismatch is only logged                 │
//! │                                                                         │
//! │  TotalPolicy::Verify         declared total must equal                 │
//! │                              Σ quantity × price_at_sale                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::validation::{validate_declared_total, validate_line_count, validate_product_id, validate_quantity};

// =============================================================================
// Request
// =============================================================================

/// One requested line: which product and how many.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderLine {
    pub product_id: i64,
    pub quantity: i64,
}

/// A checkout request as the cashier submitted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    /// Lines in the order given; processed in this order.
    pub lines: Vec<OrderLine>,
    /// Total the client computed and wants recorded.
    pub declared_total: Money,
}

impl OrderRequest {
    pub fn new(lines: Vec<OrderLine>, declared_total: Money) -> Self {
        OrderRequest {
            lines,
            declared_total,
        }
    }

    /// Checks the request before any transaction is opened.
    ///
    /// An empty line list is accepted: the order is recorded with its
    /// declared total and no items.
    pub fn validate(&self) -> CoreResult<()> {
        if validate_line_count(self.lines.len()).is_err() {
            return Err(CoreError::OrderTooLarge {
                max: crate::MAX_ORDER_LINES,
            });
        }

        for line in &self.lines {
            validate_product_id(line.product_id)?;
            validate_quantity(line.quantity)?;
        }

        validate_declared_total(self.declared_total)?;
        Ok(())
    }
}

// =============================================================================
// Policies
// =============================================================================

/// How the order transaction treats the stock floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockPolicy {
    /// Reject the order if any line would take stock below zero.
    #[default]
    Enforce,
    /// Decrement regardless; stock may go negative.
    AllowNegative,
}

/// How the order transaction treats the client-declared total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalPolicy {
    /// Store the declared total; log when it disagrees with the lines.
    #[default]
    Trust,
    /// Reject the order when the declared total disagrees with the lines.
    Verify,
}

/// Policies applied by the order transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderPolicy {
    pub stock: StockPolicy,
    pub total: TotalPolicy,
}

impl FromStr for StockPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "enforce" => Ok(StockPolicy::Enforce),
            "allow_negative" | "allow-negative" => Ok(StockPolicy::AllowNegative),
            other => Err(ValidationError::InvalidFormat {
                field: "stock_policy".to_string(),
                reason: format!("unknown policy '{}', expected enforce or allow_negative", other),
            }),
        }
    }
}

impl FromStr for TotalPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trust" => Ok(TotalPolicy::Trust),
            "verify" => Ok(TotalPolicy::Verify),
            other => Err(ValidationError::InvalidFormat {
                field: "total_policy".to_string(),
                reason: format!("unknown policy '{}', expected trust or verify", other),
            }),
        }
    }
}

impl fmt::Display for StockPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockPolicy::Enforce => write!(f, "enforce"),
            StockPolicy::AllowNegative => write!(f, "allow_negative"),
        }
    }
}

impl fmt::Display for TotalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TotalPolicy::Trust => write!(f, "trust"),
            TotalPolicy::Verify => write!(f, "verify"),
        }
    }
}

// =============================================================================
// Total Reconciliation
// =============================================================================

/// Outcome of comparing the declared total to the recorded lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalCheck {
    Matches,
    /// Declared total differs but the policy lets it through.
    Tolerated { declared: Money, computed: Money },
}

/// Compares the declared total with Σ quantity × price_at_sale.
///
/// ## Example
/// ```rust
/// use till_core::money::Money;
/// use till_core::order::{reconcile_total, TotalCheck, TotalPolicy};
///
/// let check = reconcile_total(Money::from_cents(1500), Money::from_cents(1500), TotalPolicy::Verify);
/// assert_eq!(check.unwrap(), TotalCheck::Matches);
///
/// assert!(reconcile_total(Money::from_cents(1), Money::from_cents(1500), TotalPolicy::Verify).is_err());
/// ```
pub fn reconcile_total(declared: Money, computed: Money, policy: TotalPolicy) -> CoreResult<TotalCheck> {
    if declared == computed {
        return Ok(TotalCheck::Matches);
    }

    match policy {
        TotalPolicy::Trust => Ok(TotalCheck::Tolerated { declared, computed }),
        TotalPolicy::Verify => Err(CoreError::TotalMismatch { declared, computed }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: i64, quantity: i64) -> OrderLine {
        OrderLine {
            product_id,
            quantity,
        }
    }

    #[test]
    fn test_valid_request() {
        let req = OrderRequest::new(vec![line(1, 3), line(2, 1)], Money::from_cents(1800));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_empty_request_is_accepted() {
        let req = OrderRequest::new(vec![], Money::zero());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_lines() {
        let zero_qty = OrderRequest::new(vec![line(1, 0)], Money::zero());
        assert!(matches!(zero_qty.validate(), Err(CoreError::Validation(_))));

        let bad_id = OrderRequest::new(vec![line(-4, 1)], Money::zero());
        assert!(matches!(bad_id.validate(), Err(CoreError::Validation(_))));

        let negative_total = OrderRequest::new(vec![line(1, 1)], Money::from_cents(-1));
        assert!(matches!(negative_total.validate(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_rejects_oversized_order() {
        let lines = (1..=(crate::MAX_ORDER_LINES as i64 + 1)).map(|id| line(id, 1)).collect();
        let req = OrderRequest::new(lines, Money::zero());
        assert!(matches!(req.validate(), Err(CoreError::OrderTooLarge { .. })));
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("enforce".parse::<StockPolicy>().unwrap(), StockPolicy::Enforce);
        assert_eq!("ALLOW_NEGATIVE".parse::<StockPolicy>().unwrap(), StockPolicy::AllowNegative);
        assert!("sometimes".parse::<StockPolicy>().is_err());

        assert_eq!("verify".parse::<TotalPolicy>().unwrap(), TotalPolicy::Verify);
        assert!("maybe".parse::<TotalPolicy>().is_err());
    }

    #[test]
    fn test_policy_defaults() {
        let policy = OrderPolicy::default();
        assert_eq!(policy.stock, StockPolicy::Enforce);
        assert_eq!(policy.total, TotalPolicy::Trust);
    }

    #[test]
    fn test_reconcile_trust_tolerates_mismatch() {
        let check = reconcile_total(Money::from_cents(1400), Money::from_cents(1500), TotalPolicy::Trust).unwrap();
        assert_eq!(
            check,
            TotalCheck::Tolerated {
                declared: Money::from_cents(1400),
                computed: Money::from_cents(1500),
            }
        );
    }

    #[test]
    fn test_reconcile_verify_rejects_mismatch() {
        let err = reconcile_total(Money::from_cents(1400), Money::from_cents(1500), TotalPolicy::Verify).unwrap_err();
        assert!(matches!(err, CoreError::TotalMismatch { .. }));
    }
}
