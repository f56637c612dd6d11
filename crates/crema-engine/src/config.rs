//! # Shop Configuration
//!
//! Settings loaded at startup. Read-only after initialization, so the
//! managers share it by value; if hot-reloading is ever added it would
//! move behind an `RwLock`.

use serde::{Deserialize, Serialize};

use crema_core::{TaxRate, LOYALTY_POINT_UNIT, ORDER_TAX_RATE_BPS};

/// Storefront configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopConfig {
    /// Shop name (shown on receipts and the storefront header).
    pub shop_name: String,

    /// Currency code (ISO 4217).
    pub currency_code: String,

    /// Flat tax rate applied to order subtotals.
    pub tax_rate: TaxRate,

    /// Order total in đồng required to earn one loyalty point.
    pub loyalty_point_unit: i64,

    /// Points granted to a freshly registered customer.
    pub welcome_points: i64,

    /// The login name that resolves to the store manager.
    pub admin_username: String,
}

impl Default for ShopConfig {
    /// Defaults suitable for development: 10% tax, ₫10,000 per point,
    /// 100 welcome points, "admin" as the manager login.
    fn default() -> Self {
        ShopConfig {
            shop_name: "Crema Coffee".to_string(),
            currency_code: "VND".to_string(),
            tax_rate: TaxRate::from_bps(ORDER_TAX_RATE_BPS),
            loyalty_point_unit: LOYALTY_POINT_UNIT,
            welcome_points: 100,
            admin_username: "admin".to_string(),
        }
    }
}

impl ShopConfig {
    /// Creates a configuration from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `CREMA_SHOP_NAME`: Override shop name
    /// - `CREMA_TAX_RATE_BPS`: Override tax rate in basis points
    pub fn from_env() -> Self {
        let mut config = ShopConfig::default();

        if let Ok(name) = std::env::var("CREMA_SHOP_NAME") {
            config.shop_name = name;
        }

        if let Ok(bps) = std::env::var("CREMA_TAX_RATE_BPS") {
            if let Ok(bps) = bps.parse::<u32>() {
                config.tax_rate = TaxRate::from_bps(bps);
            }
        }

        config
    }
}
