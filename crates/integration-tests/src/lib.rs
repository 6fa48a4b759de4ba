//! Integration tests for Vitrine.
//!
//! Each test opens a [`Storefront`] over a real [`FileStore`] in a temporary
//! directory and, where persistence matters, reopens it to check what
//! survived.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vitrine-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;

use secrecy::SecretString;
use tempfile::TempDir;

use vitrine_storefront::catalog::SeedPolicy;
use vitrine_storefront::services::auth::ADMIN_SECRET;
use vitrine_storefront::store::FileStore;
use vitrine_storefront::{Result, Storefront, StorefrontOptions};

/// A scratch data directory that is deleted on drop.
pub struct TestContext {
    dir: TempDir,
    pub options: StorefrontOptions,
}

impl TestContext {
    /// Fresh directory, demo seeding enabled.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
            options: StorefrontOptions::default(),
        }
    }

    /// Fresh directory that starts with an empty catalog.
    #[must_use]
    pub fn empty() -> Self {
        let mut ctx = Self::new();
        ctx.options.seed_policy = SeedPolicy::StartEmpty;
        ctx
    }

    /// Where state is written.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Open (or reopen) the storefront over this directory.
    ///
    /// # Errors
    ///
    /// Returns the storefront error if the directory cannot be used.
    pub fn open(&self) -> Result<Storefront> {
        let store = FileStore::open(self.dir.path())?;
        Storefront::with_store(store, self.options)
    }

    /// Write a raw value for `key`, bypassing the storefront.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be written.
    pub fn write_raw(&self, key: &str, contents: &str) {
        std::fs::write(self.dir.path().join(format!("{key}.json")), contents)
            .expect("Failed to write raw value");
    }

    /// Read the raw value for `key`, if present.
    #[must_use]
    pub fn read_raw(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.dir.path().join(format!("{key}.json"))).ok()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Open a storefront with the admin gate already unlocked.
///
/// # Errors
///
/// Returns the storefront error if opening or logging in fails.
pub fn open_as_admin(ctx: &TestContext) -> Result<Storefront> {
    let mut shop = ctx.open()?;
    shop.login(&SecretString::from(ADMIN_SECRET))?;
    Ok(shop)
}
