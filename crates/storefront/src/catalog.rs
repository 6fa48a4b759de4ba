//! Product catalog.
//!
//! An ordered collection of products. Insertion order is significant: it is
//! the `default` sort in [`crate::search`], and new products are prepended so
//! they appear first.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use vitrine_core::{Price, ProductId};

use crate::models::{Product, ProductInput, ValidationError};
use crate::store::{self, KeyValueStore, StoreError, keys};

/// What to do when no catalog has been persisted yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SeedPolicy {
    /// Persist and return the built-in demo products.
    #[default]
    SeedDemo,
    /// Start with an empty catalog and write nothing.
    StartEmpty,
}

/// Result of a successful [`Catalog::upsert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new product was prepended.
    Created(ProductId),
    /// An existing product was updated in place.
    Updated(ProductId),
    /// The edit target no longer exists; nothing changed.
    Missing(ProductId),
}

impl UpsertOutcome {
    /// Whether the catalog was modified.
    #[must_use]
    pub const fn changed(&self) -> bool {
        !matches!(self, Self::Missing(_))
    }
}

/// The ordered collection of all products.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from products in display order.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Iterate products in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by ID.
    #[must_use]
    pub fn find_by_id(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Whether a product with this ID exists.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.find_by_id(id).is_some()
    }

    /// Create or update a product.
    ///
    /// Input is validated first; on failure nothing changes. With an ID the
    /// matching product's mutable fields are replaced in place, keeping its
    /// ID and creation time. Without one a new product is created at `now`
    /// and prepended.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` in check order.
    pub fn upsert(
        &mut self,
        input: &ProductInput,
        now: DateTime<Utc>,
    ) -> Result<UpsertOutcome, ValidationError> {
        let fields = input.validate()?;

        match &input.id {
            Some(id) => match self.products.iter_mut().find(|p| &p.id == id) {
                Some(product) => {
                    product.apply(fields);
                    Ok(UpsertOutcome::Updated(id.clone()))
                }
                None => Ok(UpsertOutcome::Missing(id.clone())),
            },
            None => {
                let product = Product::create(fields, now);
                let id = product.id.clone();
                self.products.insert(0, product);
                Ok(UpsertOutcome::Created(id))
            }
        }
    }

    /// Remove a product, returning it if it existed.
    pub fn remove(&mut self, id: &ProductId) -> Option<Product> {
        let index = self.products.iter().position(|p| &p.id == id)?;
        Some(self.products.remove(index))
    }

    /// Prepend the quick-add demo product, bypassing validation.
    pub fn prepend_demo(&mut self, now: DateTime<Utc>) -> ProductId {
        let product = Product {
            id: ProductId::generate(),
            name: "Demo product (Quick Add)".to_owned(),
            price: Price::from_minor(159_000),
            description: "Added in one click to try out rendering, cart, admin and sorting."
                .to_owned(),
            image_url: "https://picsum.photos/seed/quickadd/900/600".to_owned(),
            is_new: true,
            created_at: now,
        };
        let id = product.id.clone();
        self.products.insert(0, product);
        id
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.products.iter()
    }
}

/// Load the persisted catalog.
///
/// Records are decoded one at a time; a record that cannot be read is logged
/// and skipped so that one bad entry never costs the rest of the catalog.
/// If nothing usable is stored, the seed policy decides: `SeedDemo` returns
/// the demo products, `StartEmpty` an empty catalog. The demo set is only
/// persisted when the stored value was absent, malformed JSON or an empty
/// array; a non-empty array whose records were all unreadable is left on
/// disk untouched until the next catalog write.
///
/// # Errors
///
/// Returns `StoreError` only if persisting the demo seed fails.
pub fn load(
    store: &mut dyn KeyValueStore,
    policy: SeedPolicy,
    now: DateTime<Utc>,
) -> Result<Catalog, StoreError> {
    let records = store::load_json_opt::<Vec<serde_json::Value>>(store, keys::PRODUCTS)
        .unwrap_or_default();
    let stored = records.len();

    let products: Vec<Product> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value(record) {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping unreadable product record");
                None
            }
        })
        .collect();

    if !products.is_empty() {
        tracing::debug!(
            products = products.len(),
            skipped = stored - products.len(),
            "Loaded catalog"
        );
        return Ok(Catalog::new(products));
    }

    match policy {
        SeedPolicy::SeedDemo => {
            let catalog = demo_catalog(now);
            if stored == 0 {
                save(store, &catalog)?;
                tracing::info!(products = catalog.len(), "Seeded demo catalog");
            } else {
                tracing::warn!(
                    records = stored,
                    "No stored product could be read, showing demo products without saving"
                );
            }
            Ok(catalog)
        }
        SeedPolicy::StartEmpty => Ok(Catalog::default()),
    }
}

/// Persist the catalog.
///
/// # Errors
///
/// Returns `StoreError` if the write fails.
pub fn save(store: &mut dyn KeyValueStore, catalog: &Catalog) -> Result<(), StoreError> {
    store::save_json(store, keys::PRODUCTS, catalog)
}

/// The built-in demo products, timestamped relative to `now`.
#[must_use]
pub fn demo_catalog(now: DateTime<Utc>) -> Catalog {
    const DEMO: [(&str, u64, &str, &str, bool, i64); 6] = [
        (
            "UI Kit Premium",
            199_000,
            "A minimal UI kit with clean typography and consistent spacing.",
            "uikit",
            true,
            2,
        ),
        (
            "Landing Page Template",
            299_000,
            "Conversion-focused, fully responsive landing page template.",
            "landing",
            true,
            24,
        ),
        (
            "Admin Dashboard UI",
            349_000,
            "Clean dashboard UI with a clear layout that is easy to extend.",
            "admin",
            false,
            48,
        ),
        (
            "Icon Pack (SVG)",
            149_000,
            "Lightweight SVG icons that follow the theme and recolor easily.",
            "icons",
            false,
            72,
        ),
        (
            "Animation Snippets",
            179_000,
            "Smooth animation snippets for fades, slides, modals and drawers.",
            "anim",
            true,
            6,
        ),
        (
            "Portfolio Starter",
            259_000,
            "A personal portfolio starter that looks good and ranks well.",
            "port",
            false,
            120,
        ),
    ];

    Catalog::new(
        DEMO.iter()
            .map(|&(name, price, description, seed, is_new, hours_ago)| Product {
                id: ProductId::generate(),
                name: name.to_owned(),
                price: Price::from_minor(price),
                description: description.to_owned(),
                image_url: format!("https://picsum.photos/seed/{seed}/900/600"),
                is_new,
                created_at: now - Duration::hours(hours_ago),
            })
            .collect(),
    )
}
