//! # Validation Module
//!
//! Input validation for the values that enter the machine at setup time:
//! product names, prices and denomination definitions.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Driver (vendo-cli)                                           │
//! │  ├── Parses denomination codes, product ids                            │
//! │  └── Reports ApiError to the operator/customer                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Constructors (Product::new, DenominationSet::new)            │
//! │  └── THIS MODULE: reject bad names, prices, face values                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Types                                                        │
//! │  ├── u32 quantities (no negative stock)                                │
//! │  └── Money (no floats)                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vendo_core::validation::{validate_product_name, validate_price_cents};
//!
//! assert!(validate_product_name("Water").is_ok());
//! assert!(validate_price_cents(-1).is_err());
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product name.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Longest accepted denomination code.
pub const MAX_DENOMINATION_CODE_LEN: usize = 16;

/// Largest accepted coin face value, in cents.
///
/// Together with [`MAX_DENOMINATIONS`] and `u32` coin counts this keeps every
/// coin stock total inside `i64`.
pub const MAX_FACE_VALUE_CENTS: i64 = 1_000_000;

/// Most denominations a single machine may accept.
pub const MAX_DENOMINATIONS: usize = 64;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product display name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use vendo_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Wafers").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a denomination code such as `"HALF"` or `"TEN"`.
///
/// ## Rules
/// - Must not be empty
/// - At most 16 characters
pub fn validate_denomination_code(code: &str) -> ValidationResult<()> {
    if code.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "denomination code".to_string(),
        });
    }

    if code.chars().count() > MAX_DENOMINATION_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "denomination code".to_string(),
            max: MAX_DENOMINATION_CODE_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use vendo_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(500).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a coin face value in cents.
///
/// ## Rules
/// - Must be positive (> 0); a zero-value coin would let the change loop
///   hand out unlimited coins for nothing
/// - At most [`MAX_FACE_VALUE_CENTS`]
pub fn validate_face_value(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "face value".to_string(),
        });
    }

    if cents > MAX_FACE_VALUE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "face value".to_string(),
            min: 1,
            max: MAX_FACE_VALUE_CENTS,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
