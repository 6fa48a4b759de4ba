//! Cart domain types.

use serde::{Deserialize, Deserializer, Serialize};

use vitrine_core::{Price, ProductId};

use super::product::Product;

/// Smallest quantity a cart entry can hold.
pub const MIN_QUANTITY: u32 = 1;

/// Largest quantity a cart entry can hold.
pub const MAX_QUANTITY: u32 = 999;

/// Clamp an arbitrary requested quantity into `[MIN_QUANTITY, MAX_QUANTITY]`.
#[must_use]
pub fn clamp_quantity(quantity: i64) -> u32 {
    let clamped = quantity.clamp(i64::from(MIN_QUANTITY), i64::from(MAX_QUANTITY));
    u32::try_from(clamped).unwrap_or(MIN_QUANTITY)
}

/// A (product, quantity) selection.
///
/// `product_id` is a weak reference: the product may have been deleted since
/// the entry was added, so every reader must handle a failed lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    #[serde(rename = "productId")]
    pub product_id: ProductId,
    #[serde(rename = "qty", deserialize_with = "deserialize_quantity")]
    pub quantity: u32,
}

/// Stored quantities are clamped on the way in, so a hand-edited store can
/// never produce an out-of-range entry.
fn deserialize_quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() {
        return Err(serde::de::Error::custom("quantity must be a finite number"));
    }
    #[allow(clippy::cast_possible_truncation)]
    Ok(clamp_quantity(raw.trunc() as i64))
}

/// Aggregate figures for a cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CartTotals {
    /// Sum of quantities over entries whose product still exists.
    pub line_count: u64,
    /// Sum of price × quantity over entries whose product still exists.
    pub amount: Price,
}

/// A cart entry resolved against the catalog.
#[derive(Debug, Clone, Copy)]
pub struct CartLine<'a> {
    pub entry: &'a CartEntry,
    /// `None` when the referenced product no longer exists.
    pub product: Option<&'a Product>,
}

impl CartLine<'_> {
    /// Price × quantity, or zero for a dangling entry.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product
            .map_or(Price::ZERO, |p| p.price.times(self.entry.quantity))
    }
}
