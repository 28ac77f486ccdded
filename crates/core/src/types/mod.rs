//! Core types for the Tradewind seller tools.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod credential;
pub mod decimal;
pub mod id;
pub mod slug;
pub mod status;

pub use credential::SellerCredentials;
pub use id::*;
pub use slug::generate_slug;
pub use status::*;
