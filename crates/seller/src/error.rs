//! Unified error handling for the form engine.

use thiserror::Error;

use crate::api::ApiError;
use crate::form::images::ImageError;

/// Errors surfaced by the edit session and its sub-stores.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Platform API operation failed.
    #[error("Platform error: {0}")]
    Api(#[from] ApiError),

    /// The product could not be loaded; the session is terminal.
    #[error("Product not found")]
    ProductNotFound,

    /// An operation requires a loaded form.
    #[error("The product has not been loaded yet")]
    NotReady,

    /// A save is already in flight.
    #[error("A save is already in progress")]
    SaveInFlight,

    /// Required variant fields are missing.
    ///
    /// Validation scans every required field before reporting, so the list
    /// names all missing fields at once.
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// One or more uploaded files are not acceptable images.
    #[error(transparent)]
    Image(#[from] ImageError),
}
