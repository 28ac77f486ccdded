//! Engine configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `TRADEWIND_API_URL` - Base URL of the platform API (e.g., <https://api.tradewind.dev>)
//! - `TRADEWIND_SELLER_ID` - Seller account id
//! - `TRADEWIND_SELLER_TOKEN` - Seller access token

use thiserror::Error;
use url::Url;

use tradewind_core::{SellerCredentials, SellerId};

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Platform API configuration for the form engine.
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// Base URL of the platform API.
    pub base_url: Url,
    /// Seller credentials sent with every request.
    pub credentials: SellerCredentials,
}

impl PlatformConfig {
    /// Create a configuration from explicit parts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] if `base_url` is not a valid
    /// absolute URL.
    pub fn new(base_url: &str, credentials: SellerCredentials) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ConfigError::InvalidEnvVar("TRADEWIND_API_URL".into(), e.to_string()))?;
        Ok(Self {
            base_url,
            credentials,
        })
    }

    /// Load the configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = require_env("TRADEWIND_API_URL")?;
        let seller_id = require_env("TRADEWIND_SELLER_ID")?;
        let token = require_env("TRADEWIND_SELLER_TOKEN")?;

        let credentials = SellerCredentials::new(SellerId::new(seller_id), token);
        Self::new(&base_url, credentials)
    }
}

fn require_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}
