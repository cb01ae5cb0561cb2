//! # App Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  storefront cart add 42                                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, AppError>                                             │  │
//! │  │         │                                                        │  │
//! │  │  DbError ──────────► DATABASE_ERROR / NOT_FOUND ──┐              │  │
//! │  │  CartError ────────► CART_ERROR / OUT_OF_STOCK ───┤              │  │
//! │  │  ValidationError ──► VALIDATION_ERROR ────────────┼──► AppError  │  │
//! │  │  ConfigError ──────► CONFIG_ERROR ────────────────┘              │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  stderr: "[NOT_FOUND] Product not found: 42"     exit code 1           │
//! │  --json: {"code":"NOT_FOUND","message":"Product not found: 42"}        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use bazaar_core::{CartError, CoreError, ValidationError};
use bazaar_db::DbError;
use serde::Serialize;

use crate::config::ConfigError;

/// Error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "OUT_OF_STOCK",
///   "message": "Insufficient stock for product 2: available 3, requested 5"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code for scripts
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Database operation failed
    DatabaseError,

    /// Cart operation refused
    CartError,

    /// Requested quantity exceeds stock
    OutOfStock,

    /// Configuration missing or invalid
    ConfigError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::CartError => "CART_ERROR",
            ErrorCode::OutOfStock => "OUT_OF_STOCK",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ConfigError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => AppError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => AppError::new(
                ErrorCode::ValidationError,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::Serialization(e) => {
                tracing::error!("Stored data could not be decoded: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Stored data is corrupt")
            }
            DbError::PoolExhausted => {
                AppError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl From<CartError> for AppError {
    fn from(err: CartError) -> Self {
        let code = match err {
            CartError::OutOfStock { .. } => ErrorCode::OutOfStock,
            CartError::InvalidQuantity { .. } | CartError::QuantityTooLarge { .. } => {
                ErrorCode::ValidationError
            }
            CartError::EmptyCart => ErrorCode::CartError,
        };
        AppError::new(code, err.to_string())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => AppError::not_found("Product", &id),
            CoreError::InvalidSnapshot(e) => AppError::internal(format!("Invalid cart snapshot: {}", e)),
            CoreError::Cart(e) => e.into(),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::config(err.to_string())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_errors_map_to_codes() {
        let err: AppError = CartError::OutOfStock {
            product_id: "2".into(),
            available: 3,
            requested: 5,
        }
        .into();
        assert_eq!(err.code, ErrorCode::OutOfStock);

        let err: AppError = CartError::EmptyCart.into();
        assert_eq!(err.code, ErrorCode::CartError);

        let err: AppError = CartError::InvalidQuantity { quantity: 0 }.into();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err: AppError = CartError::QuantityTooLarge {
            product_id: "1".into(),
            requested: 10_001,
        }
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_db_not_found_keeps_entity() {
        let err: AppError = DbError::not_found("Product", "9").into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.to_string(), "[NOT_FOUND] Product not found: 9");
    }

    #[test]
    fn test_json_shape() {
        let err = AppError::config("missing key");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "CONFIG_ERROR");
        assert_eq!(json["message"], "missing key");
    }
}
