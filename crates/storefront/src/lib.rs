//! Vitrine Storefront library.
//!
//! Catalog, cart, admin gate and preferences for a single-user storefront,
//! persisted to a local key-value store.
//!
//! # Architecture
//!
//! - [`store`] - Durable key-value storage (directory of JSON files, or memory)
//! - [`models`] - Product and cart entry types
//! - [`catalog`] / [`cart`] - Collections and their load/save
//! - [`search`] - Pure filter/sort views
//! - [`services`] - Admin gate and UI preferences
//! - [`state`] - [`Storefront`], the single owner of all state
//!
//! # Example
//!
//! ```rust
//! use vitrine_storefront::search::SortMode;
//! use vitrine_storefront::state::{Storefront, StorefrontOptions};
//! use vitrine_storefront::store::MemoryStore;
//!
//! let mut shop = Storefront::with_store(MemoryStore::new(), StorefrontOptions::default())?;
//! let id = shop.products("ui kit", SortMode::PriceAsc)[0].id.clone();
//! shop.add_to_cart(&id, 2)?;
//! assert_eq!(shop.cart_totals().line_count, 2);
//! # Ok::<(), vitrine_storefront::error::AppError>(())
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod search;
pub mod services;
pub mod state;
pub mod store;

pub use error::{AppError, Result};
pub use state::{Storefront, StorefrontOptions};
