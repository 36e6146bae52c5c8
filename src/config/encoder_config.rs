//! Overrides for the fixed market statistics fed to the encoder.

use crate::domain::ml::encoder::PlaceholderStats;
use anyhow::{Context, Result};
use std::env;

fn parse_or(key: &str, default: f64) -> Result<f64> {
    match env::var(key) {
        Ok(raw) => raw
            .parse::<f64>()
            .with_context(|| format!("Invalid {}: {}", key, raw)),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, Clone, Default)]
pub struct EncoderEnvConfig {
    pub stats: PlaceholderStats,
}

impl EncoderEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = PlaceholderStats::default();
        Ok(Self {
            stats: PlaceholderStats {
                market_share: parse_or("FEATURE_MARKET_SHARE", defaults.market_share)?,
                category_avg_market: parse_or(
                    "FEATURE_CATEGORY_AVG_MARKET",
                    defaults.category_avg_market,
                )?,
                store_avg_sales: parse_or("FEATURE_STORE_AVG_SALES", defaults.store_avg_sales)?,
                sales_momentum: parse_or("FEATURE_SALES_MOMENTUM", defaults.sales_momentum)?,
            },
        })
    }
}
