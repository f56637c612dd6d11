//! # Catalog Seed
//!
//! The first-run import collaborator: something that can produce raw
//! product records for an empty catalog. In production this would sit in
//! front of a menu service; the built-in [`MenuSeed`] ships the house
//! menu so a fresh install has something to sell.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crema_core::ProductKind;

use crate::error::ShopResult;

/// A raw product record as delivered by a seed source, before ids and
/// timestamps are assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProductRecord {
    pub name: String,
    pub description: String,
    /// Price in đồng.
    pub price: i64,
    pub kind: ProductKind,
    pub image_url: String,
}

/// Source of first-run catalog records.
#[async_trait]
pub trait CatalogSeed: Send + Sync {
    /// Fetches the raw records. I/O failures surface as store errors.
    async fn fetch(&self) -> ShopResult<Vec<RawProductRecord>>;
}

/// The built-in house menu.
#[derive(Debug, Clone, Copy, Default)]
pub struct MenuSeed;

#[async_trait]
impl CatalogSeed for MenuSeed {
    async fn fetch(&self) -> ShopResult<Vec<RawProductRecord>> {
        Ok(vec![
            RawProductRecord {
                name: "Phin Sữa Đá".to_string(),
                description: "Hương vị cà phê Việt Nam đích thực.".to_string(),
                price: 35_000,
                kind: ProductKind::Drink { hot: false },
                image_url: "/images/phin-sua-da.png".to_string(),
            },
            RawProductRecord {
                name: "Cappuccino".to_string(),
                description: "Rich coffee with steamed milk.".to_string(),
                price: 45_000,
                kind: ProductKind::Drink { hot: true },
                image_url: "/images/cappuccino.png".to_string(),
            },
            RawProductRecord {
                name: "Espresso".to_string(),
                description: "Strong black coffee.".to_string(),
                price: 35_000,
                kind: ProductKind::Drink { hot: true },
                image_url: "/images/espresso.png".to_string(),
            },
            RawProductRecord {
                name: "Trà Sen Vàng".to_string(),
                description: "Kết hợp trà Oolong, hạt sen, củ năng.".to_string(),
                price: 45_000,
                kind: ProductKind::Drink { hot: false },
                image_url: "/images/tra-sen-vang.png".to_string(),
            },
            RawProductRecord {
                name: "Bánh Mì Que Pate".to_string(),
                description: "Bánh mì giòn rụm, pate đậm đà.".to_string(),
                price: 19_000,
                kind: ProductKind::Food { vegetarian: false },
                image_url: "/images/banh-mi-que.png".to_string(),
            },
            RawProductRecord {
                name: "Veggie Sandwich".to_string(),
                description: "Fresh vegetables in whole grain bread.".to_string(),
                price: 35_000,
                kind: ProductKind::Food { vegetarian: true },
                image_url: "/images/veggie-sandwich.png".to_string(),
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_menu_seed_has_both_kinds() {
        let records = MenuSeed.fetch().await.unwrap();
        assert!(records.iter().any(|r| matches!(r.kind, ProductKind::Drink { .. })));
        assert!(records.iter().any(|r| matches!(r.kind, ProductKind::Food { .. })));
        assert!(records.iter().all(|r| r.price > 0));
    }
}
