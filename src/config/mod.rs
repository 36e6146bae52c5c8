//! Configuration module for JewelAI.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by concern: Server, Data, Encoder, and Observability.

mod data_config;
mod encoder_config;
mod observability_config;
mod server_config;

pub use data_config::{DEFAULT_MODEL_FILE, DataEnvConfig};
pub use encoder_config::EncoderEnvConfig;
pub use observability_config::ObservabilityEnvConfig;
pub use server_config::{DEFAULT_CORS_ORIGINS, ServerEnvConfig};

use anyhow::{Context, Result};

/// Main application configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub server: ServerEnvConfig,
    pub data: DataEnvConfig,
    pub encoder: EncoderEnvConfig,
    pub observability: ObservabilityEnvConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server: ServerEnvConfig::from_env().context("Failed to load server config")?,
            data: DataEnvConfig::from_env(),
            encoder: EncoderEnvConfig::from_env().context("Failed to load encoder config")?,
            observability: ObservabilityEnvConfig::from_env(),
        })
    }
}
