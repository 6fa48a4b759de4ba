//! Admin gate.
//!
//! A single persisted boolean unlocked by a shared secret compared in
//! plaintext. This is a placeholder trust mechanism for a single-user local
//! store: there is no hashing, no session expiry, no lockout and no audit
//! trail, and it offers no security guarantee.

mod error;

pub use error::AuthError;

use secrecy::{ExposeSecret, SecretString};

use crate::store::{self, KeyValueStore, StoreError, keys};

/// Shared admin secret, fixed at compile time.
///
/// Set `VITRINE_ADMIN_SECRET` when building to override the default.
pub const ADMIN_SECRET: &str = match option_env!("VITRINE_ADMIN_SECRET") {
    Some(secret) => secret,
    None => "vitrine-admin",
};

/// Whether the admin gate is currently unlocked.
///
/// An absent or unreadable flag counts as locked.
#[must_use]
pub fn is_authenticated(store: &dyn KeyValueStore) -> bool {
    store::load_json(store, keys::ADMIN_LOGGED, false)
}

/// Try to unlock the admin gate.
///
/// Surrounding whitespace in `secret` is ignored. On a mismatch nothing is
/// written.
///
/// # Errors
///
/// Returns `AuthError::IncorrectCredential` if the secret does not match, or
/// `AuthError::Store` if the flag cannot be persisted.
pub fn attempt_login(store: &mut dyn KeyValueStore, secret: &SecretString) -> Result<(), AuthError> {
    if secret.expose_secret().trim() != ADMIN_SECRET {
        tracing::warn!("Admin login rejected");
        return Err(AuthError::IncorrectCredential);
    }

    store::save_json(store, keys::ADMIN_LOGGED, &true)?;
    tracing::info!("Admin logged in");
    Ok(())
}

/// Lock the admin gate.
///
/// # Errors
///
/// Returns `StoreError` if the flag cannot be persisted.
pub fn logout(store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
    store::save_json(store, keys::ADMIN_LOGGED, &false)?;
    tracing::info!("Admin logged out");
    Ok(())
}
