//! Durable local key-value storage.
//!
//! Every piece of storefront state lives under a fixed key as a JSON document:
//!
//! ## Keys
//!
//! - [`keys::PRODUCTS`] - Catalog, an array of products
//! - [`keys::CART`] - Cart, an array of `{productId, qty}` entries
//! - [`keys::THEME`] - Theme preference string
//! - [`keys::TOPBAR_CLOSED`] - Whether the announcement bar was dismissed
//! - [`keys::ADMIN_LOGGED`] - Whether the admin gate is unlocked
//!
//! There are no transactions and no schema migrations. Reads fail soft: a
//! missing, unreadable or malformed value is replaced by a caller-supplied
//! fallback rather than surfaced as an error.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Keys under which storefront state is persisted.
pub mod keys {
    /// Key for the product catalog.
    pub const PRODUCTS: &str = "vitrine_products_v1";

    /// Key for the shopping cart.
    pub const CART: &str = "vitrine_cart_v1";

    /// Key for the theme preference.
    pub const THEME: &str = "vitrine_theme_v1";

    /// Key for the "announcement bar dismissed" flag.
    pub const TOPBAR_CLOSED: &str = "vitrine_topbar_closed_v1";

    /// Key for the admin-authenticated flag.
    pub const ADMIN_LOGGED: &str = "vitrine_admin_logged_v1";
}

/// Errors that can occur while writing to a store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem operation failed.
    #[error("storage I/O error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Value could not be serialized.
    #[error("failed to encode {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Key is not usable as a storage name.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// A durable string-to-string map.
///
/// Values are JSON text. Implementations must make a successful `set`
/// visible to every later `get`, including after a process restart for
/// durable backends.
pub trait KeyValueStore {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend could not be read. An absent key
    /// is `Ok(None)`, not an error.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the value could not be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend could not be modified.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Load and decode the JSON value under `key`.
///
/// Returns `None` if the key is absent, the backend read fails, or the
/// stored text is not valid JSON for `T`. Failures are logged and swallowed.
pub fn load_json_opt<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read stored value, using fallback");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Stored value is malformed, using fallback");
            None
        }
    }
}

/// Load and decode the JSON value under `key`, or return `fallback`.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str, fallback: T) -> T {
    load_json_opt(store, key).unwrap_or(fallback)
}

/// Encode `value` as JSON and store it under `key`.
///
/// # Errors
///
/// Returns `StoreError::Encode` if serialization fails, or the backend's
/// error if the write fails.
pub fn save_json<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_owned(),
        source,
    })?;
    store.set(key, &raw)
}
