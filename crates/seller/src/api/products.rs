//! Product fetch and update operations.

use reqwest::multipart::{Form, Part};
use tracing::instrument;

use tradewind_core::ProductId;

use crate::form::images::StagedImage;

use super::types::{ApiEnvelope, ProductDto};
use super::{ApiError, PlatformClient, rejection};

/// Default message when the server confirms an update without one.
const UPDATE_SUCCESS_MESSAGE: &str = "Product updated successfully";

/// The assembled outbound update request.
///
/// Every scalar travels as a string to match the server's form-encoded
/// convention; staged images ride along as file parts. Built by the save
/// step from the form model.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductForm {
    /// Form fields in submission order.
    pub fields: Vec<(String, String)>,
    /// Replacement main image, when one was staged.
    pub main_image: Option<StagedImage>,
    /// Newly staged gallery images.
    pub gallery: Vec<StagedImage>,
}

impl UpdateProductForm {
    /// Look up a field value (test and logging helper).
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

impl PlatformClient {
    /// Fetch one product by id.
    ///
    /// Returns `None` when the server has no such product for this seller.
    ///
    /// # Errors
    ///
    /// Returns an error if the request or decoding fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: &ProductId) -> Result<Option<ProductDto>, ApiError> {
        let envelope: ApiEnvelope<ProductDto> = self
            .get_json(&format!("seller/products/{id}"))
            .await?;

        if !envelope.is_success() {
            return Ok(None);
        }
        Ok(envelope.data)
    }

    /// Submit a product update.
    ///
    /// Returns the server's success message.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Rejected`] with the server's message (verbatim
    /// when present) if the update is refused, or a transport error if the
    /// request fails.
    #[instrument(skip(self, update), fields(field_count = update.fields.len()))]
    pub async fn update_product(&self, update: UpdateProductForm) -> Result<String, ApiError> {
        let mut form = Form::new();
        for (name, value) in update.fields {
            form = form.text(name, value);
        }
        if let Some(main) = update.main_image {
            form = form.part("main_image", file_part(main)?);
        }
        for image in update.gallery {
            form = form.part("other_images[]", file_part(image)?);
        }

        let envelope: ApiEnvelope<serde_json::Value> =
            self.post_multipart("seller/products/update", form).await?;

        if envelope.is_success() {
            Ok(envelope
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| UPDATE_SUCCESS_MESSAGE.to_string()))
        } else {
            Err(rejection(envelope.message))
        }
    }
}

fn file_part(image: StagedImage) -> Result<Part, ApiError> {
    let part = Part::bytes(image.bytes)
        .file_name(image.file_name)
        .mime_str(&image.content_type)?;
    Ok(part)
}
