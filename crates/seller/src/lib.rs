//! Tradewind Seller - Product-edit form engine.
//!
//! This crate is the shared core behind the seller panel's "Edit Product"
//! screens. The desktop and mobile shells are thin presentation layers:
//! every piece of state and every mutation they perform goes through the
//! [`session::EditorSession`] in this crate.
//!
//! # Architecture
//!
//! - [`api`] - Typed REST client for the platform seller API (reference
//!   lists, product fetch, multipart product update)
//! - [`reference`] - Load-state store for the selection lists that populate
//!   the form's dropdowns
//! - [`form`] - The in-memory form model: scalar fields, the variant
//!   collection, the image set, and category-specific specifications
//! - [`session`] - The edit-session state machine tying it all together:
//!   reference gate, single-shot product load, save coordination
//!
//! # Flow
//!
//! ```rust,ignore
//! use tradewind_seller::{config::PlatformConfig, session::EditorSession};
//!
//! let config = PlatformConfig::from_env()?;
//! let mut session = EditorSession::new(&config, product_id);
//!
//! session.load_references().await;
//! session.load_product().await?;
//!
//! let form = session.form_mut().expect("session is ready");
//! form.set_name("Oak Dining Table");
//!
//! let receipt = session.save().await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod reference;
pub mod session;

pub use api::PlatformClient;
pub use config::PlatformConfig;
pub use error::EditorError;
pub use form::FormModel;
pub use session::EditorSession;
