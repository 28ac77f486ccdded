//! Product inspection command.
//!
//! # Usage
//!
//! ```bash
//! tw-cli product show --id 12
//! ```
//!
//! Runs the same flow the edit form runs - load reference data, wait for
//! the gate, fetch the product once - and dumps the populated form model
//! as JSON.

use thiserror::Error;

use tradewind_core::ProductId;
use tradewind_seller::config::{ConfigError, PlatformConfig};
use tradewind_seller::session::{EditorSession, LoadOutcome};
use tradewind_seller::EditorError;

/// Errors that can occur while inspecting a product.
#[derive(Debug, Error)]
pub enum ProductCommandError {
    /// Configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The edit session failed to load the product.
    #[error("Session error: {0}")]
    Session(#[from] EditorError),

    /// The form could not be rendered as JSON.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Load one product through a full edit session and print its form model.
#[allow(clippy::print_stdout)]
pub async fn show(id: &str) -> Result<(), ProductCommandError> {
    dotenvy::dotenv().ok();

    let config = PlatformConfig::from_env()?;
    let mut session = EditorSession::new(&config, ProductId::new(id));

    tracing::info!(product_id = id, "Loading reference data...");
    session.load_references().await;

    let outcome = session.load_product().await?;
    if outcome == LoadOutcome::Skipped {
        tracing::warn!("Product load was skipped; check the product id");
        return Ok(());
    }

    let attributes = session.applicable_attributes().len();
    tracing::info!(attributes, "Product loaded");

    if let Some(form) = session.form() {
        println!("{}", serde_json::to_string_pretty(form)?);
    }

    Ok(())
}
