//! # Storefront Facade
//!
//! Hydrates and wires the managers into one handle the presentation
//! layer (or a test) can hold.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  1. hydrate the user directory from the customers collection        │
//! │  2. hydrate the catalog from the products collection                │
//! │  3. first run only: import the menu seed                            │
//! │  4. create the cart manager over the catalog                        │
//! │  5. hydrate the order book and wire carts + users into it           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::info;

use crema_store::DocumentStore;

use crate::cart::CartManager;
use crate::catalog::CatalogManager;
use crate::config::ShopConfig;
use crate::error::ShopResult;
use crate::orders::OrderManager;
use crate::seed::CatalogSeed;
use crate::session::UserDirectory;

/// The assembled storefront.
pub struct Storefront {
    users: Arc<UserDirectory>,
    catalog: Arc<CatalogManager>,
    carts: Arc<CartManager>,
    orders: Arc<OrderManager>,
    config: ShopConfig,
}

impl Storefront {
    /// Opens a storefront over the given store, seeding the catalog on
    /// first run.
    pub async fn open(
        store: Arc<dyn DocumentStore>,
        config: ShopConfig,
        seed: &dyn CatalogSeed,
    ) -> ShopResult<Self> {
        let users = Arc::new(UserDirectory::load(store.clone(), config.clone()).await?);
        let catalog = Arc::new(CatalogManager::load(store.clone()).await?);

        let imported = catalog.import_seed(seed).await?;
        if imported > 0 {
            info!(imported, "First run: menu seeded");
        }

        let carts = Arc::new(CartManager::new(catalog.clone()));
        let orders = Arc::new(
            OrderManager::load(store, carts.clone(), users.clone(), config.clone()).await?,
        );

        info!(shop = %config.shop_name, "Storefront ready");
        Ok(Storefront {
            users,
            catalog,
            carts,
            orders,
            config,
        })
    }

    /// Session and customer-profile operations.
    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    /// Product catalog operations.
    pub fn catalog(&self) -> &CatalogManager {
        &self.catalog
    }

    /// Cart operations.
    pub fn carts(&self) -> &CartManager {
        &self.carts
    }

    /// Checkout and order lifecycle operations.
    pub fn orders(&self) -> &OrderManager {
        &self.orders
    }

    /// The active configuration.
    pub fn config(&self) -> &ShopConfig {
        &self.config
    }
}
