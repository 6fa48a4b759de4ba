//! Admin gate error types.

use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur during admin authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Supplied secret does not match.
    #[error("incorrect credential")]
    IncorrectCredential,

    /// Persisting the authenticated flag failed.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}
