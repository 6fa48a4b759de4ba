//! Opaque product identifiers.
//!
//! Product IDs are strings of the form `p_<hex>`. Freshly generated IDs use a
//! random UUID, but any non-empty string read back from storage is accepted
//! so that previously persisted catalogs keep working.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix applied to generated product IDs.
const PREFIX: &str = "p_";

/// Identifier of a catalog product.
///
/// Assigned once at creation and never changed afterwards. Cart entries refer
/// to products through this ID only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Generate a new, unique product ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("{PREFIX}{}", uuid::Uuid::new_v4().simple()))
    }

    /// Wrap an existing identifier.
    ///
    /// Leading and trailing whitespace is stripped. Returns `None` for an
    /// empty identifier, which callers treat as "no ID supplied".
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    /// Get the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}
