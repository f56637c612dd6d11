//! # Access Control
//!
//! Role predicates consulted by every mutating operation.
//!
//! This layer has no state of its own: resolving a session handle to an
//! [`Actor`] belongs to the engine. Here we only answer "may this actor
//! do that", and we answer BEFORE any state is touched, so a rejected
//! call never leaves a partial mutation behind.

use crate::actor::Actor;
use crate::error::{CoreError, CoreResult};
use crate::order::Order;

/// Whether the actor is a store manager.
#[inline]
pub fn is_admin(actor: &Actor) -> bool {
    matches!(actor, Actor::Admin(_))
}

/// Whether the actor is a customer.
#[inline]
pub fn is_customer(actor: &Actor) -> bool {
    matches!(actor, Actor::Customer(_))
}

/// Whether the actor may read the given order.
///
/// Admins see every order; a customer sees an order only if its id is in
/// their own order history.
pub fn can_access_order(actor: &Actor, order: &Order) -> bool {
    match actor {
        Actor::Admin(_) => true,
        Actor::Customer(profile) => profile.order_ids.iter().any(|id| id == &order.id),
    }
}

/// Rejects with [`CoreError::Unauthorized`] unless the actor is an admin.
pub fn ensure_admin(actor: &Actor, operation: &str) -> CoreResult<()> {
    if is_admin(actor) {
        Ok(())
    } else {
        Err(CoreError::unauthorized(format!(
            "Only admin can {operation}"
        )))
    }
}

/// Rejects with [`CoreError::Unauthorized`] unless the actor is a customer.
pub fn ensure_customer(actor: &Actor, operation: &str) -> CoreResult<()> {
    if is_customer(actor) {
        Ok(())
    } else {
        Err(CoreError::unauthorized(format!(
            "Only customers can {operation}"
        )))
    }
}
