//! Reference-data inspection command.
//!
//! # Usage
//!
//! ```bash
//! tw-cli refs
//! ```
//!
//! Fetches every list the edit form depends on and reports the item count
//! per list. Lists whose fetch failed show up as empty, exactly as the
//! form would see them.

use thiserror::Error;

use tradewind_seller::config::{ConfigError, PlatformConfig};
use tradewind_seller::reference::ReferenceData;
use tradewind_seller::PlatformClient;

/// Errors that can occur while summarizing reference data.
#[derive(Debug, Error)]
pub enum RefsError {
    /// Configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Fetch every reference list and log a per-list summary.
pub async fn summarize() -> Result<(), RefsError> {
    dotenvy::dotenv().ok();

    let config = PlatformConfig::from_env()?;
    let client = PlatformClient::new(&config);

    tracing::info!(seller_id = client.seller_id(), "Loading reference data...");

    let mut refs = ReferenceData::default();
    refs.load_all(&client).await;

    tracing::info!(count = refs.categories.items().len(), "categories");
    tracing::info!(count = refs.taxes.items().len(), "taxes");
    tracing::info!(count = refs.brands.items().len(), "brands");
    tracing::info!(count = refs.colors.items().len(), "colors");
    tracing::info!(count = refs.sizes.items().len(), "sizes");
    tracing::info!(count = refs.materials.items().len(), "materials");
    tracing::info!(count = refs.patterns.items().len(), "patterns");
    tracing::info!(count = refs.units.items().len(), "units");
    tracing::info!(count = refs.countries.items().len(), "countries");
    tracing::info!(count = refs.tags.items().len(), "tags");
    tracing::info!(count = refs.warranties.items().len(), "warranties");
    tracing::info!(count = refs.attributes.items().len(), "attributes");
    tracing::info!(gate_open = refs.is_fully_loaded(), "Reference data loaded");

    Ok(())
}
