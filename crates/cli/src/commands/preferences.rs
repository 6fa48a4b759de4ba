//! Theme and announcement bar preferences.

use vitrine_core::Theme;
use vitrine_storefront::Storefront;

use super::CommandError;

/// Report the current theme.
pub fn show_theme(shop: &Storefront) {
    tracing::info!("Theme: {}", shop.theme());
}

/// Switch between light and dark.
///
/// # Errors
///
/// Returns an error if the preference cannot be saved.
pub fn toggle_theme(shop: &mut Storefront) -> Result<(), CommandError> {
    let theme = shop.toggle_theme()?;
    tracing::info!("Theme: {theme}");
    Ok(())
}

/// Choose a theme.
///
/// # Errors
///
/// Returns an error if the preference cannot be saved.
pub fn set_theme(shop: &mut Storefront, theme: Theme) -> Result<(), CommandError> {
    shop.set_theme(theme)?;
    tracing::info!("Theme: {theme}");
    Ok(())
}

/// Report whether the announcement bar is dismissed.
pub fn topbar_status(shop: &Storefront) {
    if shop.topbar_dismissed() {
        tracing::info!("Announcement bar: dismissed");
    } else {
        tracing::info!("Announcement bar: shown");
    }
}

/// Hide the announcement bar for good.
///
/// # Errors
///
/// Returns an error if the preference cannot be saved.
pub fn dismiss_topbar(shop: &mut Storefront) -> Result<(), CommandError> {
    shop.dismiss_topbar()?;
    tracing::info!("Announcement bar dismissed");
    Ok(())
}
