//! # Pricing
//!
//! Derives the effective unit price of a catalog item for a chosen size.
//!
//! ## Size Multiplier Table
//! ```text
//! ┌──────────┬────────────┐
//! │  Size    │ Multiplier │
//! ├──────────┼────────────┤
//! │  S       │   ×0.8     │
//! │  M       │   ×1.0     │
//! │  L       │   ×1.3     │
//! └──────────┴────────────┘
//! ```
//! Multipliers apply to drinks only. A food line records its size, but the
//! price ignores it.

use crate::money::Money;
use crate::types::{ItemSize, ProductKind};

/// Effective unit price for one unit of a product at the given size.
///
/// ## Example
/// ```rust
/// use crema_core::money::Money;
/// use crema_core::pricing::effective_unit_price;
/// use crema_core::types::{ItemSize, ProductKind};
///
/// let base = Money::from_minor(40_000);
///
/// let drink = ProductKind::Drink { hot: false };
/// assert_eq!(effective_unit_price(&drink, base, ItemSize::L).minor(), 52_000);
///
/// let food = ProductKind::Food { vegetarian: true };
/// assert_eq!(effective_unit_price(&food, base, ItemSize::L).minor(), 40_000);
/// ```
pub fn effective_unit_price(kind: &ProductKind, base_price: Money, size: ItemSize) -> Money {
    if kind.prices_by_size() {
        base_price.scale_percent(size.multiplier_percent())
    } else {
        base_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drink_scales_by_size() {
        let drink = ProductKind::Drink { hot: true };
        let base = Money::from_minor(40_000);

        assert_eq!(effective_unit_price(&drink, base, ItemSize::S).minor(), 32_000);
        assert_eq!(effective_unit_price(&drink, base, ItemSize::M).minor(), 40_000);
        assert_eq!(effective_unit_price(&drink, base, ItemSize::L).minor(), 52_000);
    }

    #[test]
    fn test_food_ignores_size() {
        let food = ProductKind::Food { vegetarian: false };
        let base = Money::from_minor(25_000);

        for size in [ItemSize::S, ItemSize::M, ItemSize::L] {
            assert_eq!(effective_unit_price(&food, base, size).minor(), 25_000);
        }
    }
}
