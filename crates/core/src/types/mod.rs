//! Core types for Vitrine.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod theme;

pub use id::ProductId;
pub use price::{Price, PriceError};
pub use theme::{Theme, ThemeParseError};
