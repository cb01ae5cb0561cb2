//! # Error Types
//!
//! Domain-specific error types for bazaar-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bazaar-core errors (this file)                                        │
//! │  ├── CoreError        - General domain errors                          │
//! │  ├── CartError        - Rejected cart mutations                        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  bazaar-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  └── AppError         - What the CLI reports (with an error code)      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → AppError → User         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tolerated Input
//! Quantity updates to zero or below and operations on unknown product ids
//! are NOT errors: the cart normalizes them and reports what happened via
//! [`crate::cart::QuantityUpdate`].

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A persisted cart snapshot could not be decoded.
    ///
    /// ## When This Occurs
    /// - Snapshot JSON is malformed or truncated
    /// - Snapshot was written by an unknown (newer) version
    #[error("Invalid cart snapshot: {0}")]
    InvalidSnapshot(String),

    /// A cart mutation was rejected.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Cart Error
// =============================================================================

/// Reasons a cart operation refuses to run.
///
/// A rejected operation always leaves the cart exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Items can only be added in positive quantities.
    #[error("Quantity must be positive, got {quantity}")]
    InvalidQuantity { quantity: i64 },

    /// Requested quantity exceeds the product's stock.
    ///
    /// ## When This Occurs
    /// Only when stock enforcement is enabled in [`crate::cart::CartPolicy`].
    ///
    /// ## User Workflow
    /// ```text
    /// Add to Cart (qty: 5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// OutOfStock { product_id: "2", available: 3, requested: 5 }
    /// ```
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    OutOfStock {
        product_id: String,
        available: i64,
        requested: i64,
    },

    /// The line would hold more than `MAX_LINE_QUANTITY` units, or the
    /// cart subtotal would pass `MAX_CART_SUBTOTAL`.
    #[error("Quantity {requested} for product {product_id} exceeds the cart limit")]
    QuantityTooLarge { product_id: String, requested: i64 },

    /// Checkout was attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when data crossing a boundary (catalog records,
/// form input, CLI arguments) doesn't meet requirements.
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

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result of a cart mutation.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CartError::OutOfStock {
            product_id: "2".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for product 2: available 3, requested 5"
        );

        let err = CartError::InvalidQuantity { quantity: -2 };
        assert_eq!(err.to_string(), "Quantity must be positive, got -2");

        let err = CartError::QuantityTooLarge {
            product_id: "1".to_string(),
            requested: 20_000,
        };
        assert_eq!(
            err.to_string(),
            "Quantity 20000 for product 1 exceeds the cart limit"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "email".to_string(),
        };
        assert_eq!(err.to_string(), "email is required");

        let err = ValidationError::TooLong {
            field: "message".to_string(),
            max: 2000,
        };
        assert_eq!(err.to_string(), "message must be at most 2000 characters");
    }

    #[test]
    fn test_errors_convert_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));

        let core_err: CoreError = CartError::EmptyCart.into();
        assert_eq!(core_err.to_string(), "Cart is empty");
    }
}
