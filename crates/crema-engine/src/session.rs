//! # Sessions and the User Directory
//!
//! Resolves opaque session tokens to acting users and owns customer
//! profiles (loyalty points, order history).
//!
//! ## Scope
//! Password hashing and verification are deliberately NOT here; the
//! storefront treats authentication mechanics as an external
//! collaborator. This directory only answers "which actor is behind this
//! token" and keeps the per-customer record straight.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  login("lan")  ──► find-or-register profile ──► token ──► Actor     │
//! │  login("admin") ─► the built-in store manager ─► token ──► Actor    │
//! │  logout(token) ──► session dropped; the cart scope ends with it     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::{debug, info};
use uuid::Uuid;

use crema_core::validation::validate_username;
use crema_core::{Actor, AdminProfile, CoreError, CustomerProfile, ValidationError};
use crema_store::{to_document, Collection, DocumentStore};

use crate::config::ShopConfig;
use crate::error::ShopResult;
use crate::repo::Repository;

// =============================================================================
// Session Token
// =============================================================================

/// Opaque handle identifying a logged-in session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    fn generate() -> Self {
        SessionToken(Uuid::new_v4().to_string())
    }

    /// The raw token value (for cookies or headers).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Who a session belongs to.
#[derive(Debug, Clone)]
enum SessionOwner {
    Admin,
    Customer(String),
}

// =============================================================================
// User Directory
// =============================================================================

/// Owns customer profiles and the token → actor mapping.
pub struct UserDirectory {
    customers: Mutex<Repository<CustomerProfile>>,
    sessions: Mutex<HashMap<SessionToken, SessionOwner>>,
    admin: AdminProfile,
    config: ShopConfig,
    store: Arc<dyn DocumentStore>,
}

impl UserDirectory {
    /// Hydrates the directory from the customers collection.
    pub async fn load(store: Arc<dyn DocumentStore>, config: ShopConfig) -> ShopResult<Self> {
        let mut customers = Repository::new();
        for doc in store.load_all(Collection::Customers).await? {
            let profile: CustomerProfile =
                crema_store::from_document(Collection::Customers, doc)?;
            customers.upsert(profile);
        }
        debug!(count = customers.len(), "Customer directory hydrated");

        Ok(UserDirectory {
            customers: Mutex::new(customers),
            sessions: Mutex::new(HashMap::new()),
            admin: AdminProfile {
                id: Uuid::new_v4().to_string(),
                username: config.admin_username.clone(),
            },
            config,
            store,
        })
    }

    /// Registers a new customer with the welcome loyalty grant.
    ///
    /// ## Errors
    /// ValidationError for an empty/overlong or already-taken username.
    pub async fn register_customer(&self, username: &str) -> ShopResult<CustomerProfile> {
        validate_username(username)?;
        let username = username.trim();

        if username == self.config.admin_username {
            return Err(ValidationError::Duplicate {
                field: "username",
                value: username.to_string(),
            }
            .into());
        }

        let profile = {
            let mut customers = self.customers.lock().expect("directory mutex poisoned");
            if customers.iter().any(|c| c.username == username) {
                return Err(ValidationError::Duplicate {
                    field: "username",
                    value: username.to_string(),
                }
                .into());
            }

            let profile = CustomerProfile {
                id: Uuid::new_v4().to_string(),
                username: username.to_string(),
                loyalty_points: self.config.welcome_points,
                order_ids: Vec::new(),
            };
            customers.upsert(profile.clone());
            profile
        };

        self.persist(&profile).await?;
        info!(customer_id = %profile.id, username = %profile.username, "Customer registered");
        Ok(profile)
    }

    /// Logs a user in and opens a session.
    ///
    /// The admin username resolves to the built-in store manager; any
    /// other name resolves to that customer's profile, registering it on
    /// first sight (welcome points included).
    pub async fn login(&self, username: &str) -> ShopResult<(SessionToken, Actor)> {
        validate_username(username)?;
        let username = username.trim();

        let (owner, actor) = if username == self.config.admin_username {
            (SessionOwner::Admin, Actor::Admin(self.admin.clone()))
        } else {
            let existing = {
                let customers = self.customers.lock().expect("directory mutex poisoned");
                let found = customers.iter().find(|c| c.username == username).cloned();
                found
            };
            let profile = match existing {
                Some(profile) => profile,
                None => self.register_customer(username).await?,
            };
            (
                SessionOwner::Customer(profile.id.clone()),
                Actor::Customer(profile),
            )
        };

        let token = SessionToken::generate();
        self.sessions
            .lock()
            .expect("session mutex poisoned")
            .insert(token.clone(), owner);

        info!(username = %username, "Session opened");
        Ok((token, actor))
    }

    /// Ends a session. Unknown tokens are ignored.
    pub fn logout(&self, token: &SessionToken) {
        self.sessions
            .lock()
            .expect("session mutex poisoned")
            .remove(token);
    }

    /// Resolves a session token to its current actor, or None for an
    /// unknown/expired token.
    ///
    /// Customer actors are rebuilt from the live profile so the order
    /// history is always current.
    pub fn resolve_actor(&self, token: &SessionToken) -> Option<Actor> {
        let owner = {
            let sessions = self.sessions.lock().expect("session mutex poisoned");
            sessions.get(token).cloned()
        }?;

        match owner {
            SessionOwner::Admin => Some(Actor::Admin(self.admin.clone())),
            SessionOwner::Customer(id) => {
                let customers = self.customers.lock().expect("directory mutex poisoned");
                customers.get(&id).cloned().map(Actor::Customer)
            }
        }
    }

    /// Returns an actor rebuilt from the live directory state.
    ///
    /// Used before access checks so a customer holding an actor snapshot
    /// from before their latest checkout still sees their own orders.
    pub fn refreshed(&self, actor: &Actor) -> Actor {
        match actor {
            Actor::Admin(_) => actor.clone(),
            Actor::Customer(profile) => {
                let customers = self.customers.lock().expect("directory mutex poisoned");
                match customers.get(&profile.id) {
                    Some(live) => Actor::Customer(live.clone()),
                    None => actor.clone(),
                }
            }
        }
    }

    /// Looks up a customer profile by id.
    pub fn customer(&self, id: &str) -> Option<CustomerProfile> {
        let customers = self.customers.lock().expect("directory mutex poisoned");
        customers.get(id).cloned()
    }

    /// Records a placed order on the customer: appends the order id to
    /// the history and credits loyalty points.
    pub async fn record_order(
        &self,
        customer_id: &str,
        order_id: &str,
        points: i64,
    ) -> ShopResult<()> {
        let profile = {
            let mut customers = self.customers.lock().expect("directory mutex poisoned");
            let profile = customers
                .get_mut(customer_id)
                .ok_or_else(|| CoreError::not_found("Customer", customer_id))?;
            profile.record_order(order_id);
            profile.add_loyalty_points(points);
            profile.clone()
        };

        self.persist(&profile).await?;
        debug!(customer_id = %customer_id, order_id = %order_id, points, "Order recorded on customer");
        Ok(())
    }

    async fn persist(&self, profile: &CustomerProfile) -> ShopResult<()> {
        let doc = to_document(Collection::Customers, profile)?;
        self.store.save(Collection::Customers, &[doc]).await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
