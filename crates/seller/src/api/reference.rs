//! Reference-list fetch operations.
//!
//! One GET per selection list. Categories are special: the endpoint
//! returns pre-rendered option markup that is flattened here before it
//! reaches the store.

use tracing::instrument;

use super::categories::{CategoryOption, parse_category_options};
use super::types::{ApiEnvelope, AttributeRow, NamedRow};
use super::{ApiError, PlatformClient, rejection};

impl PlatformClient {
    /// Fetch and flatten the category tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<Vec<CategoryOption>, ApiError> {
        let envelope: ApiEnvelope<String> = self.get_json("seller/categories").await?;
        if !envelope.is_success() {
            return Err(rejection(envelope.message));
        }
        Ok(parse_category_options(&envelope.data.unwrap_or_default()))
    }

    /// Fetch the dynamic attribute definitions.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    #[instrument(skip(self))]
    pub async fn get_attributes(&self) -> Result<Vec<AttributeRow>, ApiError> {
        let envelope: ApiEnvelope<Vec<AttributeRow>> = self.get_json("seller/attributes").await?;
        if !envelope.is_success() {
            return Err(rejection(envelope.message));
        }
        Ok(envelope.data.unwrap_or_default())
    }

    /// Fetch the tax list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    #[instrument(skip(self))]
    pub async fn get_taxes(&self) -> Result<Vec<NamedRow>, ApiError> {
        self.fetch_rows("seller/taxes").await
    }

    /// Fetch the brand list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    #[instrument(skip(self))]
    pub async fn get_brands(&self) -> Result<Vec<NamedRow>, ApiError> {
        self.fetch_rows("seller/brands").await
    }

    /// Fetch the color list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    #[instrument(skip(self))]
    pub async fn get_colors(&self) -> Result<Vec<NamedRow>, ApiError> {
        self.fetch_rows("seller/colors").await
    }

    /// Fetch the size list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    #[instrument(skip(self))]
    pub async fn get_sizes(&self) -> Result<Vec<NamedRow>, ApiError> {
        self.fetch_rows("seller/sizes").await
    }

    /// Fetch the material list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    #[instrument(skip(self))]
    pub async fn get_materials(&self) -> Result<Vec<NamedRow>, ApiError> {
        self.fetch_rows("seller/materials").await
    }

    /// Fetch the pattern list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    #[instrument(skip(self))]
    pub async fn get_patterns(&self) -> Result<Vec<NamedRow>, ApiError> {
        self.fetch_rows("seller/patterns").await
    }

    /// Fetch the measurement-unit list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    #[instrument(skip(self))]
    pub async fn get_units(&self) -> Result<Vec<NamedRow>, ApiError> {
        self.fetch_rows("seller/units").await
    }

    /// Fetch the country list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    #[instrument(skip(self))]
    pub async fn get_countries(&self) -> Result<Vec<NamedRow>, ApiError> {
        self.fetch_rows("seller/countries").await
    }

    /// Fetch the tag list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    #[instrument(skip(self))]
    pub async fn get_tags(&self) -> Result<Vec<NamedRow>, ApiError> {
        self.fetch_rows("seller/tags").await
    }

    /// Fetch the warranty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server rejects it.
    #[instrument(skip(self))]
    pub async fn get_warranties(&self) -> Result<Vec<NamedRow>, ApiError> {
        self.fetch_rows("seller/warranties").await
    }

    async fn fetch_rows(&self, path: &str) -> Result<Vec<NamedRow>, ApiError> {
        let envelope: ApiEnvelope<Vec<NamedRow>> = self.get_json(path).await?;
        if !envelope.is_success() {
            return Err(rejection(envelope.message));
        }
        Ok(envelope.data.unwrap_or_default())
    }
}
