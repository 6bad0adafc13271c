//! # Error Types
//!
//! Domain-specific error types for vendo-core.
//!
//! ## Error Hierarchy
//! ```text
//! vendo-core errors (this file)
//! ├── CheckoutError    - Checkout reconciliation failures (caller-fault)
//! └── ValidationError  - Field-level input validation failures
//!
//! vendo-db errors (separate crate)
//! └── DbError          - Store operation failures
//!
//! API errors (in apps/api)
//! └── ApiError         - What HTTP clients see (serialized, status-mapped)
//!
//! Flow: ValidationError / CheckoutError / DbError → ApiError → client
//! ```
//!
//! Errors are enum variants, never strings, and each variant carries a
//! user-facing message.

use thiserror::Error;

// =============================================================================
// Checkout Error
// =============================================================================

/// Failures of the checkout reconciler.
///
/// Every variant is caller-fault: the request is rejected before any store
/// write happens, and nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Buyer name or email is missing or empty.
    #[error("Name and email are required")]
    InvalidBuyerInfo,

    /// A proposed cart line has no product id or no usable quantity.
    /// Processing stops at the first bad line; no partial accumulation.
    #[error("Invalid cart item data")]
    InvalidCartLine,

    /// A proposed line references a product that is not in the catalog.
    /// Aborts the whole checkout; no order is created for a partially
    /// valid cart.
    #[error("Product with ID {0} not found")]
    ProductNotFound(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level input validation errors.
///
/// Used for early validation before business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_error_messages() {
        assert_eq!(
            CheckoutError::InvalidBuyerInfo.to_string(),
            "Name and email are required"
        );
        assert_eq!(
            CheckoutError::InvalidCartLine.to_string(),
            "Invalid cart item data"
        );
        assert_eq!(
            CheckoutError::ProductNotFound("abc-123".to_string()).to_string(),
            "Product with ID abc-123 not found"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "qty".to_string(),
        };
        assert_eq!(err.to_string(), "qty must be positive");
    }
}
