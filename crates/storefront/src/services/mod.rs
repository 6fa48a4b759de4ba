//! Stateless services over a [`KeyValueStore`](crate::store::KeyValueStore).
//!
//! # Services
//!
//! - `auth` - Admin gate (shared-secret login flag)
//! - `preferences` - Theme and announcement bar preferences

pub mod auth;
pub mod preferences;
