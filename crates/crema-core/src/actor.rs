//! # Acting Users
//!
//! The party performing an operation, resolved from a session handle by
//! the engine and passed into every core operation explicitly. There is
//! no ambient "current user"; the actor is always a parameter.
//!
//! Customer and Admin are arms of one closed enum rather than subclasses;
//! role checks match on the tag (see [`crate::access`]).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Role
// =============================================================================

/// The two roles the storefront distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Customer,
    Admin,
}

// =============================================================================
// Profiles
// =============================================================================

/// A customer of the shop.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerProfile {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Login name, unique across customers.
    pub username: String,

    /// Reward balance. New customers start with a welcome grant; checkout
    /// awards 1 point per 10 000 ₫ of order total.
    pub loyalty_points: i64,

    /// Append-only list of order ids this customer has placed. Membership
    /// here is what authorizes the customer to read an order.
    pub order_ids: Vec<String>,
}

impl CustomerProfile {
    /// Adds loyalty points. Non-positive grants are ignored.
    pub fn add_loyalty_points(&mut self, points: i64) {
        if points > 0 {
            self.loyalty_points += points;
        }
    }

    /// Appends an order id to the customer's history.
    pub fn record_order(&mut self, order_id: impl Into<String>) {
        self.order_ids.push(order_id.into());
    }
}

/// A store manager.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AdminProfile {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Login name.
    pub username: String,
}

// =============================================================================
// Actor
// =============================================================================

/// The authenticated party performing an operation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "role", rename_all = "UPPERCASE")]
pub enum Actor {
    Customer(CustomerProfile),
    Admin(AdminProfile),
}

impl Actor {
    /// The actor's unique id.
    pub fn id(&self) -> &str {
        match self {
            Actor::Customer(c) => &c.id,
            Actor::Admin(a) => &a.id,
        }
    }

    /// The actor's login name.
    pub fn username(&self) -> &str {
        match self {
            Actor::Customer(c) => &c.username,
            Actor::Admin(a) => &a.username,
        }
    }

    /// The actor's role tag.
    pub fn role(&self) -> Role {
        match self {
            Actor::Customer(_) => Role::Customer,
            Actor::Admin(_) => Role::Admin,
        }
    }

    /// Returns the customer profile if this actor is a customer.
    pub fn as_customer(&self) -> Option<&CustomerProfile> {
        match self {
            Actor::Customer(c) => Some(c),
            Actor::Admin(_) => None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn customer() -> CustomerProfile {
        CustomerProfile {
            id: "c-1".to_string(),
            username: "lan".to_string(),
            loyalty_points: 100,
            order_ids: Vec::new(),
        }
    }

    #[test]
    fn test_loyalty_points_ignore_non_positive() {
        let mut profile = customer();
        profile.add_loyalty_points(12);
        profile.add_loyalty_points(0);
        profile.add_loyalty_points(-5);
        assert_eq!(profile.loyalty_points, 112);
    }

    #[test]
    fn test_record_order_appends() {
        let mut profile = customer();
        profile.record_order("o-1");
        profile.record_order("o-2");
        assert_eq!(profile.order_ids, vec!["o-1", "o-2"]);
    }

    #[test]
    fn test_actor_role_tags() {
        let actor = Actor::Customer(customer());
        assert_eq!(actor.role(), Role::Customer);
        assert_eq!(actor.username(), "lan");
        assert!(actor.as_customer().is_some());

        let admin = Actor::Admin(AdminProfile {
            id: "a-1".to_string(),
            username: "admin".to_string(),
        });
        assert_eq!(admin.role(), Role::Admin);
        assert!(admin.as_customer().is_none());
    }
}
