//! Vitrine Core - Shared domain types.
//!
//! This crate provides the value types used across all Vitrine components:
//! - `storefront` - Catalog, cart and admin state persisted to a local store
//! - `cli` - Command-line front end over the storefront
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no
//! clocks. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices and the UI theme

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
