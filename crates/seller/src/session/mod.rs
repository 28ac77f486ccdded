//! The edit-session state machine.
//!
//! One session per opened edit screen. The phases are explicit:
//!
//! ```text
//! AwaitingReferences --(all lists loaded + product id)--> LoadingProduct
//! LoadingProduct --success--> Ready
//! LoadingProduct --failure--> NotFound   (terminal)
//! ```
//!
//! The product fetch fires exactly once: the latch is set before the
//! request is issued, so a second gate trigger while the first fetch is
//! still pending is a no-op. Saving is likewise guarded by an in-flight
//! flag; there are no retries and no cancellation.

pub mod payload;

use std::time::Duration;

use tracing::{info, instrument};

use tradewind_core::ProductId;

use crate::api::{ApiError, PlatformClient, convert};
use crate::config::PlatformConfig;
use crate::error::EditorError;
use crate::form::FormModel;
use crate::form::attributes::{Attribute, attributes_for_category};
use crate::reference::ReferenceData;

/// How long the shells wait after a successful save before navigating
/// back to the product list.
pub const NAVIGATE_AWAY_DELAY: Duration = Duration::from_millis(1500);

/// Where the session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Reference lists are still loading; the product fetch is gated.
    AwaitingReferences,
    /// The product fetch is in flight.
    LoadingProduct,
    /// The form is populated and editable.
    Ready,
    /// The product could not be loaded; terminal for this session.
    NotFound,
}

/// Result of a [`EditorSession::load_product`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The product was fetched and the form populated.
    Loaded,
    /// Nothing happened: the gate is closed, the id is missing, or a
    /// previous call already started the fetch.
    Skipped,
}

/// Outcome of a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReceipt {
    /// Success message for the shells to toast.
    pub message: String,
    /// Delay before navigating away from the form.
    pub redirect_after: Duration,
}

/// One seller's edit session for one product.
pub struct EditorSession {
    client: PlatformClient,
    product_id: ProductId,
    references: ReferenceData,
    phase: SessionPhase,
    product_load_started: bool,
    save_in_flight: bool,
    form: Option<FormModel>,
}

impl EditorSession {
    /// Open a session for the given product.
    #[must_use]
    pub fn new(config: &PlatformConfig, product_id: ProductId) -> Self {
        Self::with_client(PlatformClient::new(config), product_id)
    }

    /// Open a session reusing an existing client.
    #[must_use]
    pub fn with_client(client: PlatformClient, product_id: ProductId) -> Self {
        Self {
            client,
            product_id,
            references: ReferenceData::default(),
            phase: SessionPhase::AwaitingReferences,
            product_load_started: false,
            save_in_flight: false,
            form: None,
        }
    }

    /// The current phase.
    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// The reference-data store backing the selection controls.
    #[must_use]
    pub const fn references(&self) -> &ReferenceData {
        &self.references
    }

    /// The form model, once the product is loaded.
    #[must_use]
    pub const fn form(&self) -> Option<&FormModel> {
        self.form.as_ref()
    }

    /// Mutable access to the form model for seller edits.
    pub fn form_mut(&mut self) -> Option<&mut FormModel> {
        self.form.as_mut()
    }

    /// Load every reference list concurrently.
    ///
    /// Failures are recovered as loaded-empty lists, so this never fails
    /// and never blocks the gate forever.
    #[instrument(skip(self))]
    pub async fn load_references(&mut self) {
        self.references.load_all(&self.client).await;
        info!(
            gate_open = self.references.is_fully_loaded(),
            "reference data loaded"
        );
    }

    /// Fetch the product once the gate allows it.
    ///
    /// Returns [`LoadOutcome::Skipped`] while reference lists are still
    /// loading, when no product id is present, or when a previous call
    /// already started the fetch.
    ///
    /// # Errors
    ///
    /// A fetch failure or a missing product moves the session to
    /// [`SessionPhase::NotFound`]; the form stays unset and saving is
    /// rejected from then on.
    #[instrument(skip(self), fields(product_id = %self.product_id))]
    pub async fn load_product(&mut self) -> Result<LoadOutcome, EditorError> {
        if self.product_load_started {
            return Ok(LoadOutcome::Skipped);
        }
        if !self.references.is_fully_loaded() || self.product_id.is_empty() {
            return Ok(LoadOutcome::Skipped);
        }

        // Latch before the fetch is issued, so a re-trigger while the
        // request is pending cannot start a second one.
        self.product_load_started = true;
        self.phase = SessionPhase::LoadingProduct;

        match self.client.get_product(&self.product_id).await {
            Ok(Some(dto)) => {
                self.form = Some(convert::form_from_product(dto));
                self.phase = SessionPhase::Ready;
                info!("product loaded");
                Ok(LoadOutcome::Loaded)
            }
            Ok(None) => {
                self.phase = SessionPhase::NotFound;
                Err(EditorError::ProductNotFound)
            }
            Err(error) => {
                self.phase = SessionPhase::NotFound;
                Err(error.into())
            }
        }
    }

    /// The attributes applicable to the form's selected category.
    #[must_use]
    pub fn applicable_attributes(&self) -> Vec<&Attribute> {
        let selected = self.form.as_ref().and_then(FormModel::selected_category);
        attributes_for_category(self.references.attributes.items(), selected)
    }

    /// Check the variant step before the shells move past it.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::MissingFields`] naming every incomplete
    /// required field at once, or [`EditorError::NotReady`] when no form
    /// is loaded.
    pub fn validate_variant_step(&self) -> Result<(), EditorError> {
        let form = self.form.as_ref().ok_or(EditorError::NotReady)?;
        let missing = form.variants.missing_required();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(EditorError::MissingFields(
                missing.into_iter().map(String::from).collect(),
            ))
        }
    }

    /// Assemble and submit the update.
    ///
    /// On success the form is left intact and the shells are expected to
    /// navigate away after [`SaveReceipt::redirect_after`]. On failure the
    /// form stays editable for a retry.
    ///
    /// # Errors
    ///
    /// [`EditorError::SaveInFlight`] when a save is already running,
    /// [`EditorError::NotReady`] before the product is loaded, or the
    /// platform's rejection with its message surfaced verbatim.
    #[instrument(skip(self), fields(product_id = %self.product_id))]
    pub async fn save(&mut self) -> Result<SaveReceipt, EditorError> {
        if self.save_in_flight {
            return Err(EditorError::SaveInFlight);
        }
        if self.phase != SessionPhase::Ready {
            return Err(EditorError::NotReady);
        }
        let update = {
            let form = self.form.as_ref().ok_or(EditorError::NotReady)?;
            payload::build_update_form(form)
                .map_err(|e| EditorError::Api(ApiError::Parse(e)))?
        };

        self.save_in_flight = true;
        let result = self.client.update_product(update).await;
        self.save_in_flight = false;

        match result {
            Ok(message) => {
                info!("product update accepted");
                Ok(SaveReceipt {
                    message,
                    redirect_after: NAVIGATE_AWAY_DELAY,
                })
            }
            Err(error) => Err(error.into()),
        }
    }
}
