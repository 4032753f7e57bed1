//! # Error Types
//!
//! Domain-specific error types for vendo-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vendo-core errors (this file)                                         │
//! │  ├── CoreError        - Ledger / purchase failures                     │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  vendo-cli errors (driver)                                             │
//! │  ├── ApiError         - What callers see (serialized)                  │
//! │  └── ConfigError      - Bad environment configuration                  │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → caller                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Side Effects
//! Every `CoreError` is raised before anything is written: a failed call
//! leaves product stock, coin stock and the inserted coins exactly as they
//! were.

use thiserror::Error;

use crate::money::Money;
use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Ledger and purchase errors.
///
/// All are terminal for the call that raised them. The core never retries;
/// the caller decides whether to ask for more coins, offer another product
/// or refuse the sale.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// `restock` on an id that was never registered.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// Stock for the product is zero.
    ///
    /// Unregistered ids read as zero stock, so `decrement` on an unknown id
    /// lands here as well.
    #[error("Out of stock: {0}")]
    OutOfStock(ProductId),

    /// `purchase` on an id that is not in the catalog.
    #[error("Invalid product: {0}")]
    InvalidProduct(ProductId),

    /// The customer has not inserted enough to cover the price.
    ///
    /// ## User Workflow
    /// ```text
    /// Inserted: $3.50, Water costs $5.00
    ///      │
    ///      ▼
    /// InsufficientFunds { price: $5.00, inserted: $3.50 }
    ///      │
    ///      ▼
    /// Coins stay in the session, customer may top up and retry
    /// ```
    #[error("Insufficient funds: price {price}, inserted {inserted}")]
    InsufficientFunds { price: Money, inserted: Money },

    /// The coin stock cannot pay out `amount` exactly.
    #[error("Cannot provide exact change for {amount} ({remaining} short)")]
    ExactChangeUnavailable { amount: Money, remaining: Money },

    /// A coin whose denomination is not in the machine's fixed set.
    #[error("Unknown denomination: {0}")]
    UnknownDenomination(String),

    /// A quantity addition would overflow the counter.
    #[error("Stock overflow for {what}")]
    StockOverflow { what: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised when building products and denomination sets, before any ledger
/// state exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
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

    /// Duplicate value (e.g., two denominations sharing a code).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientFunds {
            price: Money::from_cents(500),
            inserted: Money::from_cents(350),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient funds: price $5.00, inserted $3.50"
        );

        let err = CoreError::NotFound(ProductId::new(99));
        assert_eq!(err.to_string(), "Product not found: 99");

        let err = CoreError::ExactChangeUnavailable {
            amount: Money::from_cents(600),
            remaining: Money::from_cents(500),
        };
        assert_eq!(
            err.to_string(),
            "Cannot provide exact change for $6.00 ($5.00 short)"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::Duplicate {
            field: "denomination".to_string(),
            value: "ONE".to_string(),
        };
        assert_eq!(err.to_string(), "denomination 'ONE' already exists");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "face value".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
