//! Seller credential types.
//!
//! Every call to the platform seller API is authenticated with the seller's
//! numeric id plus a secret access token. The token is held in a
//! [`SecretString`] so it never appears in `Debug` output or logs.

use secrecy::{ExposeSecret, SecretString};

use super::id::SellerId;

/// Credentials for the platform seller API.
#[derive(Clone)]
pub struct SellerCredentials {
    /// The seller account id.
    pub seller_id: SellerId,
    /// The seller access token.
    token: SecretString,
}

impl SellerCredentials {
    /// Create credentials from a seller id and token.
    #[must_use]
    pub fn new(seller_id: SellerId, token: impl Into<String>) -> Self {
        Self {
            seller_id,
            token: SecretString::from(token.into()),
        }
    }

    /// Expose the access token for request signing.
    ///
    /// Callers must not store or log the returned value.
    #[must_use]
    pub fn expose_token(&self) -> &str {
        self.token.expose_secret()
    }
}

impl std::fmt::Debug for SellerCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SellerCredentials")
            .field("seller_id", &self.seller_id)
            .field("token", &"[REDACTED]")
            .finish()
    }
}
