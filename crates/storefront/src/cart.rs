//! Shopping cart.
//!
//! An ordered list of (product, quantity) entries with at most one entry per
//! product. Entries reference the catalog by ID only and may dangle after a
//! product is deleted; totals and line views skip such entries.

use serde::Serialize;

use vitrine_core::ProductId;

use crate::catalog::Catalog;
use crate::models::{CartEntry, CartLine, CartTotals, clamp_quantity};
use crate::store::{self, KeyValueStore, StoreError, keys};

/// The current user's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Build a cart from stored entries, merging duplicate products.
    #[must_use]
    pub fn from_entries(entries: Vec<CartEntry>) -> Self {
        let mut cart = Self::default();
        for entry in entries {
            match cart.entry_mut(&entry.product_id) {
                Some(existing) => {
                    existing.quantity = clamp_quantity(
                        i64::from(existing.quantity) + i64::from(entry.quantity),
                    );
                }
                None => cart.entries.push(entry),
            }
        }
        cart
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry for a product, if any.
    #[must_use]
    pub fn entry(&self, product_id: &ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| &e.product_id == product_id)
    }

    fn entry_mut(&mut self, product_id: &ProductId) -> Option<&mut CartEntry> {
        self.entries.iter_mut().find(|e| &e.product_id == product_id)
    }

    /// Add `quantity` of a product.
    ///
    /// Does nothing if the product is not in `catalog`. An existing entry is
    /// incremented; otherwise a new entry is appended. Either way the result
    /// is clamped into `[1, 999]`. Returns whether the cart changed.
    pub fn add(&mut self, catalog: &Catalog, product_id: &ProductId, quantity: i64) -> bool {
        if !catalog.contains(product_id) {
            return false;
        }

        match self.entry_mut(product_id) {
            Some(existing) => {
                existing.quantity =
                    clamp_quantity(i64::from(existing.quantity).saturating_add(quantity));
            }
            None => self.entries.push(CartEntry {
                product_id: product_id.clone(),
                quantity: clamp_quantity(quantity),
            }),
        }
        true
    }

    /// Remove a product's entry. Returns whether one existed.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| &e.product_id != product_id);
        self.entries.len() != before
    }

    /// Set a product's quantity, clamped into `[1, 999]`.
    ///
    /// Does nothing if the product has no entry. Returns whether an entry
    /// was updated.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) -> bool {
        match self.entry_mut(product_id) {
            Some(entry) => {
                entry.quantity = clamp_quantity(quantity);
                true
            }
            None => false,
        }
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Resolve every entry against the catalog.
    #[must_use]
    pub fn lines<'a>(&'a self, catalog: &'a Catalog) -> Vec<CartLine<'a>> {
        self.entries
            .iter()
            .map(|entry| CartLine {
                entry,
                product: catalog.find_by_id(&entry.product_id),
            })
            .collect()
    }

    /// Item count and amount over entries whose product still exists.
    #[must_use]
    pub fn totals(&self, catalog: &Catalog) -> CartTotals {
        self.entries
            .iter()
            .filter_map(|entry| {
                catalog
                    .find_by_id(&entry.product_id)
                    .map(|product| (entry.quantity, product.price.times(entry.quantity)))
            })
            .fold(CartTotals::default(), |acc, (quantity, line)| CartTotals {
                line_count: acc.line_count + u64::from(quantity),
                amount: acc.amount + line,
            })
    }
}

/// Load the persisted cart, or an empty cart if none is stored.
///
/// An absent cart is initialised as empty and persisted, so the key always
/// exists after the first load.
///
/// # Errors
///
/// Returns `StoreError` only if persisting the empty cart fails.
pub fn load(store: &mut dyn KeyValueStore) -> Result<Cart, StoreError> {
    if let Some(entries) = store::load_json_opt::<Vec<CartEntry>>(store, keys::CART) {
        let cart = Cart::from_entries(entries);
        tracing::debug!(entries = cart.entries().len(), "Loaded cart");
        return Ok(cart);
    }

    let cart = Cart::default();
    save(store, &cart)?;
    Ok(cart)
}

/// Persist the cart.
///
/// # Errors
///
/// Returns `StoreError` if the write fails.
pub fn save(store: &mut dyn KeyValueStore, cart: &Cart) -> Result<(), StoreError> {
    store::save_json(store, keys::CART, cart)
}
