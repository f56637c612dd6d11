//! # Error Types
//!
//! Domain-specific error types for crema-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  crema-core errors (this file)                                      │
//! │  ├── CoreError        - Domain rule violations                      │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  crema-store errors (separate crate)                                │
//! │  └── StoreError       - Persistence failures (the I/O kind)         │
//! │                                                                     │
//! │  crema-engine errors                                                │
//! │  └── ShopError        - What service callers see                    │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → ShopError → presentation       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (entity, id, status)
//! 3. Errors are enum variants, never String
//! 4. Every operation rejects before mutating; a failed call leaves no
//!    partial state behind

use thiserror::Error;

use crate::order::OrderStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These are the distinguishable failure kinds every storefront operation
/// can produce. Callers match on the variant, not on message text.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input failed validation (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The acting user's role does not permit the operation.
    ///
    /// ## When This Occurs
    /// - A customer calls a catalog mutation or a status update
    /// - An admin calls a cart or checkout operation
    /// - A customer reads another customer's order
    ///
    /// Raised before any state is touched.
    #[error("Not authorized: {reason}")]
    Unauthorized { reason: String },

    /// A referenced entity does not exist.
    ///
    /// ## When This Occurs
    /// - Updating an unknown product
    /// - Fetching or transitioning an unknown order
    ///
    /// Deliberately NOT raised by idempotent removals (delete-if-exists,
    /// remove-if-present); those report absence through their return value.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The requested order status change is not legal.
    ///
    /// Orders only move forward one step at a time, or to Cancelled from
    /// any non-terminal state. Delivered and Cancelled accept nothing.
    #[error("Order {order_id} cannot move from {from:?} to {to:?}")]
    InvalidStatusTransition {
        order_id: String,
        from: OrderStatus,
        to: OrderStatus,
    },

    /// Cart has exceeded the maximum number of distinct lines.
    #[error("Cart cannot have more than {max} lines")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds the maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: u32, max: u32 },
}

impl CoreError {
    /// Creates an Unauthorized error.
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        CoreError::Unauthorized {
            reason: reason.into(),
        }
    }

    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity,
            id: id.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when caller input doesn't meet requirements and are raised
/// before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: &'static str },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    /// Invalid format (e.g., unrecognized size code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: &'static str, reason: String },

    /// Duplicate value (e.g., an already-taken username).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: &'static str, value: String },

    /// The cart has no lines to check out.
    #[error("Cart is empty")]
    EmptyCart,

    /// The referenced product cannot be ordered right now.
    #[error("Product {id} is not available")]
    ProductUnavailable { id: String },
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
        let err = CoreError::not_found("Order", "abc-123");
        assert_eq!(err.to_string(), "Order not found: abc-123");

        let err = CoreError::unauthorized("Only admin can update products");
        assert_eq!(
            err.to_string(),
            "Not authorized: Only admin can update products"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required { field: "name" };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive { field: "price" };
        assert_eq!(err.to_string(), "price must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::EmptyCart;
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_transition_error_message() {
        let err = CoreError::InvalidStatusTransition {
            order_id: "o-1".to_string(),
            from: OrderStatus::Delivered,
            to: OrderStatus::Pending,
        };
        assert!(err.to_string().contains("Delivered"));
        assert!(err.to_string().contains("Pending"));
    }
}
