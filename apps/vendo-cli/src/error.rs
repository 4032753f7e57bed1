//! # API Error Type
//!
//! Unified error type for driver commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Vendo                                  │
//! │                                                                         │
//! │  purchase(session, 1)                                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Unknown session? ─── ApiError::session_not_found ──┐           │  │
//! │  │         │                                           │           │  │
//! │  │         ▼                                           ▼           │  │
//! │  │  Core rejects? ─── CoreError::InsufficientFunds ── ApiError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors serialize with both a machine-readable `code` and a human-readable
//! `message`.

use serde::Serialize;
use vendo_core::CoreError;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INSUFFICIENT_FUNDS",
///   "message": "Insufficient funds: price $5.00, inserted $3.50"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Restock of an unregistered product
    NotFound,

    /// Product has no units left
    OutOfStock,

    /// Purchase of a product not in the catalog
    InvalidProduct,

    /// Customer must insert more coins
    InsufficientFunds,

    /// Machine cannot pay the change out exactly
    ExactChangeUnavailable,

    /// Coin not accepted by this machine
    UnknownDenomination,

    /// Input validation failed
    ValidationError,

    /// Session id does not exist (or was closed)
    SessionNotFound,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a session not found error.
    pub fn session_not_found(session_id: impl std::fmt::Display) -> Self {
        ApiError::new(
            ErrorCode::SessionNotFound,
            format!("Session not found: {}", session_id),
        )
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::NotFound(_) => ErrorCode::NotFound,
            CoreError::OutOfStock(_) => ErrorCode::OutOfStock,
            CoreError::InvalidProduct(_) => ErrorCode::InvalidProduct,
            CoreError::InsufficientFunds { .. } => ErrorCode::InsufficientFunds,
            CoreError::ExactChangeUnavailable { .. } => ErrorCode::ExactChangeUnavailable,
            CoreError::UnknownDenomination(_) => ErrorCode::UnknownDenomination,
            CoreError::StockOverflow { .. } | CoreError::Validation(_) => {
                ErrorCode::ValidationError
            }
        };
        ApiError::new(code, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use vendo_core::{Money, ProductId, ValidationError};

    #[test]
    fn test_core_error_codes() {
        let cases = [
            (CoreError::NotFound(ProductId::new(1)), ErrorCode::NotFound),
            (CoreError::OutOfStock(ProductId::new(1)), ErrorCode::OutOfStock),
            (
                CoreError::InvalidProduct(ProductId::new(1)),
                ErrorCode::InvalidProduct,
            ),
            (
                CoreError::ExactChangeUnavailable {
                    amount: Money::from_cents(600),
                    remaining: Money::from_cents(500),
                },
                ErrorCode::ExactChangeUnavailable,
            ),
            (
                CoreError::UnknownDenomination("PENNY".to_string()),
                ErrorCode::UnknownDenomination,
            ),
            (
                CoreError::Validation(ValidationError::Required {
                    field: "name".to_string(),
                }),
                ErrorCode::ValidationError,
            ),
        ];

        for (core, code) in cases {
            assert_eq!(ApiError::from(core).code, code);
        }
    }

    #[test]
    fn test_message_is_core_message() {
        let err = ApiError::from(CoreError::InsufficientFunds {
            price: Money::from_cents(500),
            inserted: Money::from_cents(350),
        });
        assert_eq!(err.code, ErrorCode::InsufficientFunds);
        assert_eq!(
            err.message,
            "Insufficient funds: price $5.00, inserted $3.50"
        );
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::from(CoreError::OutOfStock(ProductId::new(2)));
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "OUT_OF_STOCK");
        assert_eq!(json["message"], "Out of stock: 2");
    }
}
