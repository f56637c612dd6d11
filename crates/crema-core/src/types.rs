//! # Catalog Types
//!
//! Product definitions for the coffee-shop menu.
//!
//! ## Closed Variant Design
//! The source of truth for "what kind of product is this" is a tagged
//! enum, not a class hierarchy. Everything that would have been an
//! overridden method (size pricing, labels) is a function that matches
//! on the tag.
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Product                                     │
//! │                                                                     │
//! │  id, name, description, price, available, image_url, timestamps     │
//! │                            │                                        │
//! │              ┌─────────────┴─────────────┐                          │
//! │              ▼                           ▼                          │
//! │   ProductKind::Drink { hot }   ProductKind::Food { vegetarian }     │
//! │   size multiplier APPLIES      size is cosmetic only                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Item Size
// =============================================================================

/// Cup/portion size selected for a cart line.
///
/// Only drinks price by size; food lines record the size without it
/// affecting the price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum ItemSize {
    S,
    #[default]
    M,
    L,
}

impl ItemSize {
    /// Price multiplier as an integer percent: S 80, M 100, L 130.
    #[inline]
    pub const fn multiplier_percent(&self) -> u32 {
        match self {
            ItemSize::S => 80,
            ItemSize::M => 100,
            ItemSize::L => 130,
        }
    }

    /// Parses a single-letter size code, case-insensitive.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "S" | "s" => Some(ItemSize::S),
            "M" | "m" => Some(ItemSize::M),
            "L" | "l" => Some(ItemSize::L),
            _ => None,
        }
    }

    /// Display label for receipts and logs.
    pub const fn label(&self) -> &'static str {
        match self {
            ItemSize::S => "Small",
            ItemSize::M => "Medium",
            ItemSize::L => "Large",
        }
    }
}

// =============================================================================
// Product Kind
// =============================================================================

/// Category tag with category-specific payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProductKind {
    /// A beverage. `hot` distinguishes hot drinks from iced ones.
    Drink { hot: bool },
    /// A food item. `vegetarian` is surfaced as a menu badge.
    Food { vegetarian: bool },
}

impl ProductKind {
    /// Whether size multipliers apply to this kind.
    #[inline]
    pub const fn prices_by_size(&self) -> bool {
        matches!(self, ProductKind::Drink { .. })
    }
}

// =============================================================================
// Product
// =============================================================================

/// A menu item offered by the shop.
///
/// ## Lifecycle
/// Created and mutated only by admin actions. Never physically deleted
/// while orders reference it: orders carry their own copied snapshots, so
/// catalog deletion only removes visibility.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4). Assigned once, never reused.
    pub id: String,

    /// Display name shown on the menu and on order lines.
    pub name: String,

    /// Menu description.
    pub description: String,

    /// Base price in đồng. Size multipliers apply on top for drinks.
    pub price: Money,

    /// Drink or food, with the kind-specific payload.
    pub kind: ProductKind,

    /// Whether the product is currently orderable.
    pub available: bool,

    /// Menu image reference.
    pub image_url: String,

    /// When the product was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Whether this product is a drink.
    #[inline]
    pub fn is_drink(&self) -> bool {
        self.kind.prices_by_size()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
