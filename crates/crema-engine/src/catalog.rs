//! # Catalog Manager
//!
//! Owns product definitions: admin-gated CRUD plus the availability
//! listing the storefront menu renders from.
//!
//! ## Deletion Semantics
//! `delete_product` removes catalog VISIBILITY only and is idempotent
//! (true, then false, never an error). Placed orders are untouched: they
//! carry their own copied line snapshots, so there is no dangling
//! reference to protect against.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crema_core::access::ensure_admin;
use crema_core::validation::{validate_price, validate_product_name};
use crema_core::{Actor, Money, Product, ProductKind};
use crema_store::{to_document, Collection, DocumentStore};

use crate::error::ShopResult;
use crate::repo::Repository;
use crate::seed::CatalogSeed;

// =============================================================================
// Input DTOs
// =============================================================================

/// Fields for creating a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Money,
    pub kind: ProductKind,
    pub image_url: String,
}

/// Partial update: only supplied fields are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Money>,
    pub available: Option<bool>,
    pub image_url: Option<String>,
}

// =============================================================================
// Catalog Manager
// =============================================================================

/// Repository of menu products, gated by role checks.
pub struct CatalogManager {
    products: Mutex<Repository<Product>>,
    store: Arc<dyn DocumentStore>,
}

impl CatalogManager {
    /// Hydrates the catalog from the products collection.
    pub async fn load(store: Arc<dyn DocumentStore>) -> ShopResult<Self> {
        let mut products = Repository::new();
        for doc in store.load_all(Collection::Products).await? {
            let product: Product = crema_store::from_document(Collection::Products, doc)?;
            products.upsert(product);
        }
        debug!(count = products.len(), "Catalog hydrated");

        Ok(CatalogManager {
            products: Mutex::new(products),
            store,
        })
    }

    /// Creates a product. Admin only.
    ///
    /// ## Errors
    /// - Unauthorized for non-admin actors (checked first)
    /// - ValidationError for an empty name or non-positive price
    pub async fn create_product(
        &self,
        draft: ProductDraft,
        actor: &Actor,
    ) -> ShopResult<Product> {
        ensure_admin(actor, "create products")?;
        validate_product_name(&draft.name)?;
        validate_price(draft.price)?;

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: draft.name.trim().to_string(),
            description: draft.description,
            price: draft.price,
            kind: draft.kind,
            available: true,
            image_url: draft.image_url,
            created_at: now,
            updated_at: now,
        };

        self.products
            .lock()
            .expect("catalog mutex poisoned")
            .upsert(product.clone());
        self.persist(&product).await?;

        info!(product_id = %product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Applies a partial update to a product. Admin only.
    ///
    /// ## Errors
    /// - Unauthorized for non-admin actors
    /// - NotFound for an unknown id
    /// - ValidationError if the patch would blank the name or zero the
    ///   price (validated BEFORE anything is applied)
    pub async fn update_product(
        &self,
        product_id: &str,
        patch: ProductPatch,
        actor: &Actor,
    ) -> ShopResult<Product> {
        ensure_admin(actor, "update products")?;

        if let Some(name) = &patch.name {
            validate_product_name(name)?;
        }
        if let Some(price) = patch.price {
            validate_price(price)?;
        }

        let product = {
            let mut products = self.products.lock().expect("catalog mutex poisoned");
            let product = products
                .get_mut(product_id)
                .ok_or_else(|| crema_core::CoreError::not_found("Product", product_id))?;

            if let Some(name) = patch.name {
                product.name = name.trim().to_string();
            }
            if let Some(description) = patch.description {
                product.description = description;
            }
            if let Some(price) = patch.price {
                product.price = price;
            }
            if let Some(available) = patch.available {
                product.available = available;
            }
            if let Some(image_url) = patch.image_url {
                product.image_url = image_url;
            }
            product.updated_at = Utc::now();
            product.clone()
        };

        self.persist(&product).await?;
        info!(product_id = %product.id, "Product updated");
        Ok(product)
    }

    /// Removes a product from the catalog. Admin only, idempotent.
    ///
    /// ## Returns
    /// Whether a product was actually removed; false for an id that is
    /// already absent. Never raises NotFound.
    pub async fn delete_product(&self, product_id: &str, actor: &Actor) -> ShopResult<bool> {
        ensure_admin(actor, "delete products")?;

        let removed = self
            .products
            .lock()
            .expect("catalog mutex poisoned")
            .remove(product_id);

        if removed {
            self.store.delete(Collection::Products, product_id).await?;
            info!(product_id = %product_id, "Product deleted");
        }
        Ok(removed)
    }

    /// Lists orderable products in insertion order.
    pub fn list_available(&self) -> Vec<Product> {
        let products = self.products.lock().expect("catalog mutex poisoned");
        products.iter().filter(|p| p.available).cloned().collect()
    }

    /// Looks up a product by id, available or not.
    pub fn get_by_id(&self, product_id: &str) -> Option<Product> {
        let products = self.products.lock().expect("catalog mutex poisoned");
        products.get(product_id).cloned()
    }

    /// Number of products, including unavailable ones.
    pub fn len(&self) -> usize {
        self.products.lock().expect("catalog mutex poisoned").len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products
            .lock()
            .expect("catalog mutex poisoned")
            .is_empty()
    }

    /// Imports the first-run menu from a seed collaborator.
    ///
    /// Runs as part of system startup, before any session exists, so it
    /// takes no actor. A non-empty catalog makes this a no-op, which
    /// keeps the import idempotent across restarts.
    ///
    /// ## Returns
    /// How many products were imported.
    pub async fn import_seed(&self, seed: &dyn CatalogSeed) -> ShopResult<usize> {
        if !self.is_empty() {
            debug!("Catalog already populated, skipping seed import");
            return Ok(0);
        }

        let records = seed.fetch().await?;
        let mut imported = Vec::with_capacity(records.len());
        let now = Utc::now();

        for record in records {
            let product = Product {
                id: Uuid::new_v4().to_string(),
                name: record.name,
                description: record.description,
                price: Money::from_minor(record.price),
                kind: record.kind,
                available: true,
                image_url: record.image_url,
                created_at: now,
                updated_at: now,
            };
            imported.push(product);
        }

        {
            let mut products = self.products.lock().expect("catalog mutex poisoned");
            for product in &imported {
                products.upsert(product.clone());
            }
        }

        let docs = imported
            .iter()
            .map(|p| to_document(Collection::Products, p))
            .collect::<Result<Vec<_>, _>>()?;
        self.store.save(Collection::Products, &docs).await?;

        info!(count = imported.len(), "Catalog seeded");
        Ok(imported.len())
    }

    async fn persist(&self, product: &Product) -> ShopResult<()> {
        let doc = to_document(Collection::Products, product)?;
        self.store.save(Collection::Products, &[doc]).await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
