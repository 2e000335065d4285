//! Service settings: built-in defaults, then an optional `storefront.toml`,
//! then `STOREFRONT__SECTION__KEY` environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::orders::PricingConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub pricing: PricingConfig,
    pub orders: OrderSettings,
    pub catalog: CatalogSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub bind_address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderSettings {
    /// Attempts for an order write that keeps losing version races.
    pub max_commit_attempts: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    /// Load the sample catalog at startup.
    pub seed: bool,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(Some("storefront"))
    }

    /// Load settings, reading `<file>.toml` (or any format `config`
    /// recognises) when it exists.
    pub fn load(file: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("server.bind_address", "0.0.0.0:5000")?
            .set_default("pricing.tax_rate", 0.18)?
            .set_default("pricing.free_shipping_threshold", 1000)?
            .set_default("pricing.flat_shipping_fee", 50)?
            .set_default("pricing.delivery_estimate_days", 7)?
            .set_default("orders.max_commit_attempts", 3)?
            .set_default("catalog.seed", true)?;

        if let Some(name) = file {
            builder = builder.add_source(File::with_name(name).required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix("STOREFRONT")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}
