//! Product domain types.
//!
//! The serialized field names (`desc`, `image`, `isNew`, `createdAt`) are the
//! persisted layout and must not change without a new storage key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use vitrine_core::{Price, PriceError, ProductId};

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Immutable identifier assigned at creation.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price.
    pub price: Price,
    /// Free-form description.
    #[serde(rename = "desc")]
    pub description: String,
    /// Image URL shown on product cards.
    #[serde(rename = "image")]
    pub image_url: String,
    /// Whether to badge the product as new.
    #[serde(default)]
    pub is_new: bool,
    /// Creation time. Absent in old records, which read as the epoch.
    #[serde(default, with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

/// Validation failures for product input.
///
/// Display strings are user-facing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Product name cannot be empty")]
    EmptyName,

    #[error("Description cannot be empty")]
    EmptyDescription,

    #[error("Image URL cannot be empty")]
    EmptyImageUrl,

    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] PriceError),
}

/// Raw product form input, as typed by an admin.
///
/// `price` is kept as text so that parsing is part of validation.
#[derive(Debug, Clone, Default)]
pub struct ProductInput {
    /// Target product for an edit, or `None` to create.
    pub id: Option<ProductId>,
    pub name: String,
    pub price: String,
    pub description: String,
    pub image_url: String,
    pub is_new: bool,
}

/// The mutable fields of a product after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFields {
    pub name: String,
    pub price: Price,
    pub description: String,
    pub image_url: String,
    pub is_new: bool,
}

impl ProductInput {
    /// Input for a new product.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        description: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            price: price.into(),
            description: description.into(),
            image_url: image_url.into(),
            is_new: false,
        }
    }

    /// Target an existing product instead of creating one.
    #[must_use]
    pub fn with_id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the "new" badge.
    #[must_use]
    pub const fn marked_new(mut self, is_new: bool) -> Self {
        self.is_new = is_new;
        self
    }

    /// Validate and normalize the input.
    ///
    /// Checks run in order: name, description, image URL, price. The first
    /// failure is returned.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` encountered.
    pub fn validate(&self) -> Result<ProductFields, ValidationError> {
        let name = self.name.trim();
        let description = self.description.trim();
        let image_url = self.image_url.trim();

        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        if image_url.is_empty() {
            return Err(ValidationError::EmptyImageUrl);
        }
        let price = Price::parse(&self.price)?;

        Ok(ProductFields {
            name: name.to_owned(),
            price,
            description: description.to_owned(),
            image_url: image_url.to_owned(),
            is_new: self.is_new,
        })
    }
}

impl Product {
    /// Build a new product with a freshly generated ID.
    #[must_use]
    pub fn create(fields: ProductFields, now: DateTime<Utc>) -> Self {
        Self {
            id: ProductId::generate(),
            name: fields.name,
            price: fields.price,
            description: fields.description,
            image_url: fields.image_url,
            is_new: fields.is_new,
            created_at: now,
        }
    }

    /// Replace every mutable field, keeping `id` and `created_at`.
    pub fn apply(&mut self, fields: ProductFields) {
        self.name = fields.name;
        self.price = fields.price;
        self.description = fields.description;
        self.image_url = fields.image_url;
        self.is_new = fields.is_new;
    }

    /// Whether the lowercased `needle` occurs in the name or description.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}
