//! Session configuration.
//!
//! # Environment Variables
//!
//! All optional; [`SessionConfig::default`] carries the site's
//! reference values.
//!
//! - `SIPAYI_CART_KEY` - Storage key for the cart (default: `hotel_sipayi_cart`)
//! - `SIPAYI_ORDERS_KEY` - Storage key for order history (default: `hotel_sipayi_orders`)
//! - `SIPAYI_DELIVERY_FEE` - Flat delivery fee in rupees (default: 40)
//! - `SIPAYI_TAX_RATE` - Tax rate as a decimal fraction (default: 0.05)
//! - `SIPAYI_SUBMIT_LATENCY_MS` - Simulated submission latency (default: 1000)

use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Knobs for the cart/order engine.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Storage key holding the serialized cart.
    pub cart_key: String,
    /// Storage key holding the serialized order history.
    pub orders_key: String,
    /// Flat delivery fee added to every order.
    pub delivery_fee: Decimal,
    /// Tax rate applied to the subtotal (0.05 = 5%).
    pub tax_rate: Decimal,
    /// Simulated latency for order submission.
    pub submit_latency: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cart_key: "hotel_sipayi_cart".to_owned(),
            orders_key: "hotel_sipayi_orders".to_owned(),
            delivery_fee: Decimal::from(40),
            // 5% tax
            tax_rate: Decimal::new(5, 2),
            submit_latency: Duration::from_millis(1000),
        }
    }
}

impl SessionConfig {
    /// Load the configuration, applying any `SIPAYI_*` overrides from
    /// the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] if an override is present
    /// but unparseable, or if a fee/rate override is negative.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(|name| std::env::var(name).ok())
    }

    fn load(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(key) = var("SIPAYI_CART_KEY") {
            config.cart_key = key;
        }
        if let Some(key) = var("SIPAYI_ORDERS_KEY") {
            config.orders_key = key;
        }
        if let Some(fee) = var("SIPAYI_DELIVERY_FEE") {
            config.delivery_fee = parse_non_negative("SIPAYI_DELIVERY_FEE", &fee)?;
        }
        if let Some(rate) = var("SIPAYI_TAX_RATE") {
            config.tax_rate = parse_non_negative("SIPAYI_TAX_RATE", &rate)?;
        }
        if let Some(latency) = var("SIPAYI_SUBMIT_LATENCY_MS") {
            let millis: u64 = latency.parse().map_err(|_| {
                ConfigError::InvalidEnvVar("SIPAYI_SUBMIT_LATENCY_MS".to_owned(), latency.clone())
            })?;
            config.submit_latency = Duration::from_millis(millis);
        }

        Ok(config)
    }
}

fn parse_non_negative(name: &str, raw: &str) -> Result<Decimal, ConfigError> {
    let value: Decimal = raw
        .parse()
        .map_err(|_| ConfigError::InvalidEnvVar(name.to_owned(), raw.to_owned()))?;
    if value < Decimal::ZERO {
        return Err(ConfigError::InvalidEnvVar(name.to_owned(), raw.to_owned()));
    }
    Ok(value)
}
