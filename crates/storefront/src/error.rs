//! Unified error handling.
//!
//! Provides a unified `AppError` type returned by every fallible
//! [`Storefront`](crate::state::Storefront) operation. Missing references are
//! never errors; they are silent no-ops reported through return values.

use thiserror::Error;

use crate::models::ValidationError;
use crate::services::auth::AuthError;
use crate::store::StoreError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Product input failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Admin login failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Operation requires the admin gate to be unlocked.
    #[error("Unauthorized: admin login required")]
    Unauthorized,

    /// Persisting state failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl AppError {
    /// Message suitable for showing to the user.
    ///
    /// Storage details are not exposed.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::Auth(AuthError::IncorrectCredential) => "Incorrect password".to_string(),
            Self::Unauthorized => "Please log in as admin first".to_string(),
            Self::Auth(AuthError::Store(_)) | Self::Store(_) => {
                "Could not save your changes".to_string()
            }
        }
    }

    /// Whether the error was caused by user input rather than the system.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Auth(AuthError::IncorrectCredential) | Self::Unauthorized
        )
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
