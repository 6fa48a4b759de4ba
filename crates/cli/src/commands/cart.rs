//! Cart commands.

use vitrine_core::ProductId;
use vitrine_storefront::Storefront;

use super::CommandError;

/// Print each cart line and the totals.
pub fn show(shop: &Storefront) {
    let lines = shop.cart_lines();
    if lines.is_empty() {
        tracing::info!("Cart is empty");
        return;
    }

    for line in &lines {
        match line.product {
            Some(product) => tracing::info!(
                "{} x{} @ {} = {}",
                product.name,
                line.entry.quantity,
                product.price,
                line.line_total()
            ),
            None => tracing::warn!(
                "{} x{} (product no longer available)",
                line.entry.product_id,
                line.entry.quantity
            ),
        }
    }

    let totals = shop.cart_totals();
    tracing::info!("{} item(s), total {}", totals.line_count, totals.amount);
}

/// Add a product to the cart.
///
/// # Errors
///
/// Returns the storefront error if the cart cannot be saved.
pub fn add(shop: &mut Storefront, id: &ProductId, quantity: i64) -> Result<(), CommandError> {
    if shop.add_to_cart(id, quantity)? {
        log_quantity(shop, id);
    } else {
        tracing::warn!("No product with id {id}, cart unchanged");
    }
    Ok(())
}

/// Remove a product from the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn remove(shop: &mut Storefront, id: &ProductId) -> Result<(), CommandError> {
    if shop.remove_from_cart(id)? {
        tracing::info!("Removed {id} from cart");
    } else {
        tracing::info!("{id} was not in the cart");
    }
    Ok(())
}

/// Replace the quantity of a product already in the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn set_quantity(shop: &mut Storefront, id: &ProductId, quantity: i64) -> Result<(), CommandError> {
    if shop.set_cart_quantity(id, quantity)? {
        log_quantity(shop, id);
    } else {
        tracing::info!("{id} is not in the cart");
    }
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn clear(shop: &mut Storefront) -> Result<(), CommandError> {
    shop.clear_cart()?;
    tracing::info!("Cart cleared");
    Ok(())
}

fn log_quantity(shop: &Storefront, id: &ProductId) {
    if let Some(entry) = shop.cart().entry(id) {
        tracing::info!("{id} quantity is now {}", entry.quantity);
    }
}
