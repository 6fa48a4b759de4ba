//! Storefront state owner.
//!
//! [`Storefront`] holds the catalog, the cart and the backing store, and is the
//! only thing allowed to mutate them. Every mutating operation persists the
//! affected collections before returning, so a crash never loses an
//! acknowledged change.

use chrono::Utc;
use secrecy::SecretString;
use tracing::instrument;

use vitrine_core::{ProductId, Theme};

use crate::cart::{self, Cart};
use crate::catalog::{self, Catalog, SeedPolicy, UpsertOutcome};
use crate::config::StorefrontConfig;
use crate::error::{AppError, Result};
use crate::models::{CartLine, CartTotals, Product, ProductInput};
use crate::search::{self, SortMode};
use crate::services::{auth, preferences};
use crate::store::{FileStore, KeyValueStore, keys};

/// Behavioural knobs for a [`Storefront`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StorefrontOptions {
    /// What to do when no catalog is stored.
    pub seed_policy: SeedPolicy,
    /// Theme reported until one is chosen.
    pub default_theme: Theme,
}

impl From<&StorefrontConfig> for StorefrontOptions {
    fn from(config: &StorefrontConfig) -> Self {
        Self {
            seed_policy: config.seed_policy,
            default_theme: config.default_theme,
        }
    }
}

/// The storefront: catalog, cart, admin gate and preferences over one store.
pub struct Storefront {
    store: Box<dyn KeyValueStore>,
    catalog: Catalog,
    cart: Cart,
    options: StorefrontOptions,
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("products", &self.catalog.len())
            .field("cart_entries", &self.cart.entries().len())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Storefront {
    /// Open the file-backed storefront described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the data directory cannot be created or
    /// initial state cannot be persisted.
    pub fn open(config: &StorefrontConfig) -> Result<Self> {
        let store = FileStore::open(&config.data_dir)?;
        tracing::info!(dir = %config.data_dir.display(), "Opening storefront");
        Self::with_store(store, StorefrontOptions::from(config))
    }

    /// Build a storefront over any store, loading or seeding its state.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if initial state cannot be persisted.
    pub fn with_store<S>(store: S, options: StorefrontOptions) -> Result<Self>
    where
        S: KeyValueStore + 'static,
    {
        let mut store: Box<dyn KeyValueStore> = Box::new(store);
        let catalog = catalog::load(store.as_mut(), options.seed_policy, Utc::now())?;
        let cart = cart::load(store.as_mut())?;

        Ok(Self {
            store,
            catalog,
            cart,
            options,
        })
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// The full catalog in catalog order.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Look up a product.
    #[must_use]
    pub fn find_product(&self, id: &ProductId) -> Option<&Product> {
        self.catalog.find_by_id(id)
    }

    /// Filtered, sorted view of the catalog.
    #[must_use]
    pub fn products(&self, search: &str, sort: SortMode) -> Vec<&Product> {
        search::view(&self.catalog, search, sort)
    }

    /// Create or update a product. Requires admin.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` if the admin gate is locked,
    /// `AppError::Validation` if the input is invalid, or `AppError::Store`
    /// if persisting fails. Nothing changes on validation failure.
    #[instrument(skip(self, input), fields(id = ?input.id))]
    pub fn upsert_product(&mut self, input: &ProductInput) -> Result<UpsertOutcome> {
        self.require_admin()?;

        let outcome = self.catalog.upsert(input, Utc::now())?;
        match &outcome {
            UpsertOutcome::Created(id) => {
                catalog::save(self.store.as_mut(), &self.catalog)?;
                tracing::info!(%id, "Product created");
            }
            UpsertOutcome::Updated(id) => {
                catalog::save(self.store.as_mut(), &self.catalog)?;
                tracing::info!(%id, "Product updated");
            }
            UpsertOutcome::Missing(id) => {
                tracing::debug!(%id, "Edit target no longer exists");
            }
        }
        Ok(outcome)
    }

    /// Delete a product and every cart entry referencing it. Requires admin.
    ///
    /// Returns the deleted product, or `None` if it did not exist (in which
    /// case nothing changes).
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthorized` if the admin gate is locked, or
    /// `AppError::Store` if persisting fails.
    #[instrument(skip(self))]
    pub fn delete_product(&mut self, id: &ProductId) -> Result<Option<Product>> {
        self.require_admin()?;

        let Some(removed) = self.catalog.remove(id) else {
            return Ok(None);
        };
        self.cart.remove(id);

        catalog::save(self.store.as_mut(), &self.catalog)?;
        cart::save(self.store.as_mut(), &self.cart)?;
        tracing::info!(%id, name = %removed.name, "Product deleted");
        Ok(Some(removed))
    }

    /// Prepend the quick-add demo product.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if persisting fails.
    #[instrument(skip(self))]
    pub fn quick_add_demo(&mut self) -> Result<ProductId> {
        let id = self.catalog.prepend_demo(Utc::now());
        catalog::save(self.store.as_mut(), &self.catalog)?;
        tracing::info!(%id, "Demo product added");
        Ok(id)
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// The cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Cart entries resolved against the catalog.
    #[must_use]
    pub fn cart_lines(&self) -> Vec<CartLine<'_>> {
        self.cart.lines(&self.catalog)
    }

    /// Item count and amount of the cart.
    #[must_use]
    pub fn cart_totals(&self) -> CartTotals {
        self.cart.totals(&self.catalog)
    }

    /// Add a product to the cart. Unknown products are ignored.
    ///
    /// Returns whether the cart changed.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if persisting fails.
    #[instrument(skip(self))]
    pub fn add_to_cart(&mut self, id: &ProductId, quantity: i64) -> Result<bool> {
        if !self.cart.add(&self.catalog, id, quantity) {
            tracing::debug!(%id, "Ignoring add for unknown product");
            return Ok(false);
        }
        cart::save(self.store.as_mut(), &self.cart)?;
        Ok(true)
    }

    /// Remove a product from the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if persisting fails.
    #[instrument(skip(self))]
    pub fn remove_from_cart(&mut self, id: &ProductId) -> Result<bool> {
        if !self.cart.remove(id) {
            return Ok(false);
        }
        cart::save(self.store.as_mut(), &self.cart)?;
        Ok(true)
    }

    /// Set the quantity of a product already in the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if persisting fails.
    #[instrument(skip(self))]
    pub fn set_cart_quantity(&mut self, id: &ProductId, quantity: i64) -> Result<bool> {
        if !self.cart.set_quantity(id, quantity) {
            return Ok(false);
        }
        cart::save(self.store.as_mut(), &self.cart)?;
        Ok(true)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if persisting fails.
    #[instrument(skip(self))]
    pub fn clear_cart(&mut self) -> Result<()> {
        self.cart.clear();
        cart::save(self.store.as_mut(), &self.cart)?;
        Ok(())
    }

    // =========================================================================
    // Admin
    // =========================================================================

    /// Whether the admin gate is unlocked.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        auth::is_authenticated(self.store.as_ref())
    }

    /// Try to unlock the admin gate.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Auth` if the secret is wrong or the flag cannot be
    /// persisted.
    #[instrument(skip(self, secret))]
    pub fn login(&mut self, secret: &SecretString) -> Result<()> {
        auth::attempt_login(self.store.as_mut(), secret)?;
        Ok(())
    }

    /// Lock the admin gate.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the flag cannot be persisted.
    #[instrument(skip(self))]
    pub fn logout(&mut self) -> Result<()> {
        auth::logout(self.store.as_mut())?;
        Ok(())
    }

    /// Erase catalog, cart, theme and admin flag, then reload defaults.
    ///
    /// The catalog is reseeded according to the seed policy and the cart
    /// starts empty. The announcement bar preference is kept.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if any key cannot be removed or the
    /// defaults cannot be persisted.
    #[instrument(skip(self))]
    pub fn reset_all_state(&mut self) -> Result<()> {
        for key in [keys::PRODUCTS, keys::CART, keys::THEME, keys::ADMIN_LOGGED] {
            self.store.remove(key)?;
        }

        self.catalog = catalog::load(self.store.as_mut(), self.options.seed_policy, Utc::now())?;
        self.cart = cart::load(self.store.as_mut())?;
        tracing::info!(products = self.catalog.len(), "Storefront reset");
        Ok(())
    }

    fn require_admin(&self) -> Result<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Unauthorized)
        }
    }

    // =========================================================================
    // Preferences
    // =========================================================================

    /// Current theme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        preferences::theme(self.store.as_ref(), self.options.default_theme)
    }

    /// Choose a theme.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if persisting fails.
    pub fn set_theme(&mut self, theme: Theme) -> Result<()> {
        preferences::set_theme(self.store.as_mut(), theme)?;
        Ok(())
    }

    /// Switch to the other theme and return it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if persisting fails.
    pub fn toggle_theme(&mut self) -> Result<Theme> {
        Ok(preferences::toggle_theme(
            self.store.as_mut(),
            self.options.default_theme,
        )?)
    }

    /// Whether the announcement bar has been dismissed.
    #[must_use]
    pub fn topbar_dismissed(&self) -> bool {
        preferences::topbar_dismissed(self.store.as_ref())
    }

    /// Dismiss the announcement bar for good.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if persisting fails.
    pub fn dismiss_topbar(&mut self) -> Result<()> {
        preferences::dismiss_topbar(self.store.as_mut())?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use vitrine_core::Price;

    use super::*;
    use crate::services::auth::ADMIN_SECRET;
    use crate::store::MemoryStore;

    fn storefront() -> Storefront {
        Storefront::with_store(MemoryStore::new(), StorefrontOptions::default()).unwrap()
    }

    fn admin_storefront() -> Storefront {
        let mut shop = storefront();
        shop.login(&SecretString::from(ADMIN_SECRET.to_owned()))
            .unwrap();
        shop
    }

    fn first_id(shop: &Storefront) -> ProductId {
        shop.catalog().products().first().unwrap().id.clone()
    }

    #[test]
    fn test_new_storefront_is_seeded() {
        let shop = storefront();
        assert_eq!(shop.catalog().len(), 6);
        assert!(shop.cart().is_empty());
        assert!(!shop.is_admin());
        assert_eq!(shop.theme(), Theme::Light);
    }

    #[test]
    fn test_catalog_writes_require_admin() {
        let mut shop = storefront();
        let input = ProductInput::new("x", "1", "d", "i");
        assert!(matches!(
            shop.upsert_product(&input),
            Err(AppError::Unauthorized)
        ));

        let id = first_id(&shop);
        assert!(matches!(
            shop.delete_product(&id),
            Err(AppError::Unauthorized)
        ));
        assert_eq!(shop.catalog().len(), 6);
    }

    #[test]
    fn test_upsert_validation_error_propagates() {
        let mut shop = admin_storefront();
        let input = ProductInput::new("x", "-3", "d", "i");
        assert!(matches!(
            shop.upsert_product(&input),
            Err(AppError::Validation(_))
        ));
        assert_eq!(shop.catalog().len(), 6);
    }

    #[test]
    fn test_delete_cascades_to_cart() {
        let mut shop = admin_storefront();
        let id = first_id(&shop);
        shop.add_to_cart(&id, 2).unwrap();

        let removed = shop.delete_product(&id).unwrap();
        assert_eq!(removed.unwrap().id, id);
        assert!(shop.find_product(&id).is_none());
        assert!(shop.cart().entry(&id).is_none());
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let mut shop = admin_storefront();
        let other = first_id(&shop);
        shop.add_to_cart(&other, 1).unwrap();
        let catalog = shop.catalog().clone();
        let cart = shop.cart().clone();

        let ghost = ProductId::parse("p_ghost").unwrap();
        assert!(shop.delete_product(&ghost).unwrap().is_none());
        assert_eq!(shop.catalog(), &catalog);
        assert_eq!(shop.cart(), &cart);
    }

    #[test]
    fn test_cart_operations_persist() {
        let mut shop = storefront();
        let id = first_id(&shop);

        assert!(shop.add_to_cart(&id, 3).unwrap());
        assert!(shop.set_cart_quantity(&id, 7).unwrap());
        let stored = shop.store().get(keys::CART).unwrap().unwrap();
        assert!(stored.contains(r#""qty":7"#));

        assert!(shop.remove_from_cart(&id).unwrap());
        assert!(!shop.remove_from_cart(&id).unwrap());
        assert_eq!(shop.store().get(keys::CART).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_cart_totals() {
        let mut shop = storefront();
        let id = first_id(&shop);
        let price = shop.find_product(&id).unwrap().price;
        shop.add_to_cart(&id, 2).unwrap();

        let totals = shop.cart_totals();
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.amount, price.times(2));
        assert_eq!(shop.cart_lines().len(), 1);
    }

    #[test]
    fn test_quick_add_demo_does_not_require_admin() {
        let mut shop = storefront();
        let id = shop.quick_add_demo().unwrap();
        assert_eq!(first_id(&shop), id);
        assert_eq!(
            shop.find_product(&id).unwrap().price,
            Price::from_minor(159_000)
        );
    }

    #[test]
    fn test_reset_all_state() {
        let mut shop = admin_storefront();
        let id = first_id(&shop);
        shop.add_to_cart(&id, 1).unwrap();
        shop.set_theme(Theme::Dark).unwrap();
        shop.dismiss_topbar().unwrap();
        shop.delete_product(&id).unwrap();

        shop.reset_all_state().unwrap();

        assert_eq!(shop.catalog().len(), 6);
        assert!(shop.cart().is_empty());
        assert_eq!(shop.theme(), Theme::Light);
        assert!(!shop.is_admin());
        assert!(shop.topbar_dismissed());
    }

    #[test]
    fn test_reset_with_start_empty_policy() {
        let options = StorefrontOptions {
            seed_policy: SeedPolicy::StartEmpty,
            default_theme: Theme::Dark,
        };
        let mut shop = Storefront::with_store(MemoryStore::new(), options).unwrap();
        assert!(shop.catalog().is_empty());
        shop.quick_add_demo().unwrap();

        shop.reset_all_state().unwrap();
        assert!(shop.catalog().is_empty());
        assert_eq!(shop.theme(), Theme::Dark);
    }

    #[test]
    fn test_wrong_login() {
        let mut shop = storefront();
        let err = shop
            .login(&SecretString::from("wrong".to_owned()))
            .unwrap_err();
        assert!(err.is_user_error());
        assert!(!shop.is_admin());
    }
}
