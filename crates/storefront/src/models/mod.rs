//! Domain models for the storefront.
//!
//! These are plain data types. Collection logic lives in [`crate::catalog`]
//! and [`crate::cart`].

pub mod cart;
pub mod product;

pub use cart::{CartEntry, CartLine, CartTotals, MAX_QUANTITY, MIN_QUANTITY, clamp_quantity};
pub use product::{Product, ProductFields, ProductInput, ValidationError};
