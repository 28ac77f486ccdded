//! Tradewind Core - Shared types library.
//!
//! This crate provides common types used across the Tradewind seller tools:
//! - `seller` - The product-edit form engine consumed by the seller panel
//! - `cli` - Command-line tools for inspecting platform data
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere, including inside UI
//! shells compiled for other targets.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, slug generation, seller credentials, and the
//!   shared enums for variant kind and stock policy

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
