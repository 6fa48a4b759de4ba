//! Admin gate commands.
//!
//! # Usage
//!
//! ```bash
//! vitrine admin login --password "$VITRINE_ADMIN_PASSWORD"
//! vitrine admin status
//! vitrine admin logout
//!
//! # Wipe products, cart, theme and login, then reseed
//! vitrine admin reset
//! ```
//!
//! # Environment Variables
//!
//! - `VITRINE_ADMIN_PASSWORD` - Password used by `login` when `--password` is omitted

use secrecy::SecretString;
use vitrine_storefront::Storefront;

use super::CommandError;

/// Unlock admin operations.
///
/// # Errors
///
/// Returns `CommandError::MissingPassword` when no password was supplied,
/// or the storefront error when the password is wrong.
pub fn login(shop: &mut Storefront, password: Option<String>) -> Result<(), CommandError> {
    let password = password.ok_or(CommandError::MissingPassword)?;
    let secret = SecretString::from(password);

    shop.login(&secret)?;
    tracing::info!("Logged in as admin");
    Ok(())
}

/// Lock admin operations.
///
/// # Errors
///
/// Returns an error if the login flag cannot be cleared.
pub fn logout(shop: &mut Storefront) -> Result<(), CommandError> {
    shop.logout()?;
    tracing::info!("Logged out");
    Ok(())
}

/// Report whether admin operations are unlocked.
pub fn status(shop: &Storefront) {
    if shop.is_admin() {
        tracing::info!("Admin: logged in");
    } else {
        tracing::info!("Admin: logged out");
    }
}

/// Erase persisted state and restore defaults.
///
/// # Errors
///
/// Returns an error if the store cannot be cleared or reseeded.
pub fn reset(shop: &mut Storefront) -> Result<(), CommandError> {
    shop.reset_all_state()?;
    tracing::info!(
        "Storefront reset: {} products, cart empty, theme {}",
        shop.catalog().len(),
        shop.theme()
    );
    tracing::warn!("Admin session cleared. Log in again to manage products.");
    Ok(())
}
