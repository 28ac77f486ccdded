//! Platform seller API client.
//!
//! A thin, typed client over the platform's REST dialect: JSON responses
//! wrapped in a `{ status, message, data }` envelope, authenticated with
//! the seller's id and access token on every call, and one multipart POST
//! for the product update.
//!
//! # Example
//!
//! ```rust,ignore
//! use tradewind_seller::{PlatformClient, PlatformConfig};
//!
//! let client = PlatformClient::new(&PlatformConfig::from_env()?);
//!
//! let brands = client.get_brands().await?;
//! let product = client.get_product(&product_id).await?;
//! ```

pub mod categories;
pub mod convert;
pub mod products;
pub mod types;

mod reference;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use tradewind_core::SellerCredentials;

use crate::config::PlatformConfig;

use types::ApiEnvelope;

/// Errors that can occur when talking to the platform API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Authentication failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The server reported a failure for this request.
    #[error("{0}")]
    Rejected(String),
}

/// Fallback when the server rejects a request without a message.
pub(crate) const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong, please try again later";

pub(crate) fn rejection(message: Option<String>) -> ApiError {
    ApiError::Rejected(
        message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
    )
}

/// Platform seller API client.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct PlatformClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
    credentials: SellerCredentials,
}

impl PlatformClient {
    /// Create a new client for the configured platform.
    #[must_use]
    pub fn new(config: &PlatformConfig) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                http: reqwest::Client::new(),
                base_url: config.base_url.clone(),
                credentials: config.credentials.clone(),
            }),
        }
    }

    /// The seller id these requests act for.
    #[must_use]
    pub fn seller_id(&self) -> &str {
        self.inner.credentials.seller_id.as_str()
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.inner.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header(
                "Authorization",
                format!("Bearer {}", self.inner.credentials.expose_token()),
            )
            .header("X-Seller-Id", self.inner.credentials.seller_id.as_str())
    }

    /// GET an endpoint and decode its envelope.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let url = self.endpoint(path);
        let response = self.authorize(self.inner.http.get(&url)).send().await?;
        decode(path, response).await
    }

    /// POST a multipart form to an endpoint and decode its envelope.
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<ApiEnvelope<T>, ApiError> {
        let url = self.endpoint(path);
        let response = self
            .authorize(self.inner.http.post(&url))
            .multipart(form)
            .send()
            .await?;
        decode(path, response).await
    }
}

async fn decode<T: DeserializeOwned>(
    path: &str,
    response: reqwest::Response,
) -> Result<ApiEnvelope<T>, ApiError> {
    if response.status() == reqwest::StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized(
            "Invalid or expired seller token".to_string(),
        ));
    }
    if response.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound(path.to_string()));
    }

    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}
