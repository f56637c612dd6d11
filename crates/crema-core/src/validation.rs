//! # Validation Module
//!
//! Input validation rules shared by the storefront services.
//!
//! ## Validation Strategy
//! The storefront UI gives immediate feedback, but the engine never
//! trusts it: every operation re-validates its input here before any
//! state is touched. A failed validation leaves everything unchanged.

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::ItemSize;
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty or whitespace-only
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use crema_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Phin Sữa Đá").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required { field: "name" });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "name",
            max: 200,
        });
    }

    Ok(())
}

/// Validates a customer login name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
pub fn validate_username(username: &str) -> ValidationResult<()> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ValidationError::Required { field: "username" });
    }

    if username.chars().count() > 50 {
        return Err(ValidationError::TooLong {
            field: "username",
            max: 50,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a product price.
///
/// ## Rules
/// - Must be strictly positive (free items are not a thing on this menu)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive { field: "price" });
    }
    Ok(())
}

/// Validates a quantity for adding to a cart.
///
/// ## Rules
/// - Must be at least 1
/// - Must not exceed [`MAX_LINE_QUANTITY`]
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty < 1 {
        return Err(ValidationError::MustBePositive { field: "quantity" });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity",
            min: 1,
            max: MAX_LINE_QUANTITY as i64,
        });
    }

    Ok(())
}

// =============================================================================
// Parse Helpers
// =============================================================================

/// Parses a size code from the storefront ("S"/"M"/"L", case-insensitive).
pub fn parse_size(code: &str) -> ValidationResult<ItemSize> {
    ItemSize::from_code(code).ok_or_else(|| ValidationError::InvalidFormat {
        field: "size",
        reason: format!("'{}' is not one of S, M, L", code.trim()),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
