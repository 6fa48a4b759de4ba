//! CLI command implementations.

pub mod admin;
pub mod cart;
pub mod preferences;
pub mod products;

use thiserror::Error;

use vitrine_core::ProductId;
use vitrine_storefront::AppError;
use vitrine_storefront::config::ConfigError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A blank product id was given.
    #[error("Product id cannot be empty")]
    EmptyProductId,

    /// No product has the given id.
    #[error("No product with id {0}")]
    ProductNotFound(ProductId),

    /// Login was attempted without a password.
    #[error("Missing password: pass --password or set VITRINE_ADMIN_PASSWORD")]
    MissingPassword,

    /// The storefront rejected the operation.
    #[error("{}", .0.user_message())]
    App(#[from] AppError),
}
