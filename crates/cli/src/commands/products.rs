//! Product catalog commands.
//!
//! `add`, `edit` and `delete` require an admin login (see `vitrine admin login`).

use clap::Args;

use vitrine_core::ProductId;
use vitrine_storefront::Storefront;
use vitrine_storefront::catalog::UpsertOutcome;
use vitrine_storefront::models::{Product, ProductInput};
use vitrine_storefront::search::SortMode;

use super::CommandError;

/// Fields for a new product.
#[derive(Debug, Args)]
pub struct ProductForm {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Price in đồng, e.g. `199000`
    #[arg(long)]
    pub price: String,

    /// Short description
    #[arg(long)]
    pub description: String,

    /// Image URL
    #[arg(long)]
    pub image: String,

    /// Show the "new" badge
    #[arg(long)]
    pub new: bool,
}

/// Fields to change on an existing product.
#[derive(Debug, Args)]
pub struct ProductEdit {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub price: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub image: Option<String>,

    /// Show the "new" badge
    #[arg(long, conflicts_with = "not_new")]
    pub new: bool,

    /// Hide the "new" badge
    #[arg(long)]
    pub not_new: bool,
}

impl ProductEdit {
    /// Merge the requested changes over the current product.
    fn into_input(self, current: &Product) -> ProductInput {
        let is_new = if self.new {
            true
        } else if self.not_new {
            false
        } else {
            current.is_new
        };

        ProductInput::new(
            self.name.unwrap_or_else(|| current.name.clone()),
            self.price
                .unwrap_or_else(|| current.price.minor_units().to_string()),
            self.description
                .unwrap_or_else(|| current.description.clone()),
            self.image.unwrap_or_else(|| current.image_url.clone()),
        )
        .with_id(current.id.clone())
        .marked_new(is_new)
    }
}

fn log_product(product: &Product) {
    let badge = if product.is_new { " [new]" } else { "" };
    tracing::info!(
        "{}  {}  {}{}",
        product.id,
        product.price,
        product.name,
        badge
    );
}

/// List products matching `search`, in `sort` order.
pub fn list(shop: &Storefront, search: &str, sort: SortMode) {
    let products = shop.products(search, sort);
    if products.is_empty() {
        tracing::info!("No products found");
        return;
    }

    for product in &products {
        log_product(product);
    }
    tracing::info!("{} product(s)", products.len());
}

/// Show one product in full.
///
/// # Errors
///
/// Returns `CommandError::ProductNotFound` for an unknown id.
pub fn show(shop: &Storefront, id: &ProductId) -> Result<(), CommandError> {
    let product = shop
        .find_product(id)
        .ok_or_else(|| CommandError::ProductNotFound(id.clone()))?;

    log_product(product);
    tracing::info!("Description: {}", product.description);
    tracing::info!("Image: {}", product.image_url);
    tracing::info!("Created: {}", product.created_at.to_rfc3339());
    Ok(())
}

/// Create a product.
///
/// # Errors
///
/// Returns the storefront error if the admin gate is locked, the input is
/// invalid, or the catalog cannot be saved.
pub fn add(shop: &mut Storefront, form: ProductForm) -> Result<(), CommandError> {
    let input = ProductInput::new(form.name, form.price, form.description, form.image)
        .marked_new(form.new);

    if let UpsertOutcome::Created(id) = shop.upsert_product(&input)? {
        tracing::info!("Created product {id}");
    }
    Ok(())
}

/// Edit a product, keeping current values for omitted fields.
///
/// An unknown id leaves the catalog untouched.
///
/// # Errors
///
/// Returns the storefront error if the edit is rejected.
pub fn edit(shop: &mut Storefront, id: &ProductId, edit: ProductEdit) -> Result<(), CommandError> {
    let Some(current) = shop.find_product(id) else {
        tracing::warn!("No product with id {id}, nothing to edit");
        return Ok(());
    };
    let input = edit.into_input(current);

    match shop.upsert_product(&input)? {
        UpsertOutcome::Missing(id) => tracing::warn!("No product with id {id}, nothing to edit"),
        UpsertOutcome::Created(id) | UpsertOutcome::Updated(id) => {
            tracing::info!("Updated product {id}");
        }
    }
    Ok(())
}

/// Delete a product; it is also removed from the cart.
///
/// # Errors
///
/// Returns the storefront error if the admin gate is locked or saving fails.
pub fn delete(shop: &mut Storefront, id: &ProductId) -> Result<(), CommandError> {
    match shop.delete_product(id)? {
        Some(removed) => tracing::info!("Deleted product {} ({})", removed.id, removed.name),
        None => tracing::warn!("No product with id {id}, nothing deleted"),
    }
    Ok(())
}

/// Prepend the demo product.
///
/// # Errors
///
/// Returns an error if the catalog cannot be saved.
pub fn demo(shop: &mut Storefront) -> Result<(), CommandError> {
    let id = shop.quick_add_demo()?;
    tracing::info!("Added demo product {id}");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use vitrine_core::Price;

    use super::*;

    fn current() -> Product {
        Product {
            id: ProductId::parse("p_abc").unwrap(),
            name: "Icon Pack".to_owned(),
            price: Price::from_minor(129_000),
            description: "Icons".to_owned(),
            image_url: "https://img/icons.png".to_owned(),
            is_new: true,
            created_at: Utc::now(),
        }
    }

    fn no_changes() -> ProductEdit {
        ProductEdit {
            name: None,
            price: None,
            description: None,
            image: None,
            new: false,
            not_new: false,
        }
    }

    #[test]
    fn test_edit_keeps_unspecified_fields() {
        let product = current();
        let input = no_changes().into_input(&product);

        assert_eq!(input.id, Some(product.id.clone()));
        let fields = input.validate().unwrap();
        assert_eq!(fields.name, "Icon Pack");
        assert_eq!(fields.price, Price::from_minor(129_000));
        assert!(fields.is_new);
    }

    #[test]
    fn test_edit_overrides_given_fields() {
        let edit = ProductEdit {
            price: Some("99000".to_owned()),
            not_new: true,
            ..no_changes()
        };
        let fields = edit.into_input(&current()).validate().unwrap();
        assert_eq!(fields.price, Price::from_minor(99_000));
        assert!(!fields.is_new);
        assert_eq!(fields.description, "Icons");
    }
}
