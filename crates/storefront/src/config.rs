//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `VITRINE_DATA_DIR` - Directory holding the persisted state (default: `.vitrine`)
//! - `VITRINE_SEED_DEMO` - Seed demo products into an empty catalog (default: `true`)
//! - `VITRINE_DEFAULT_THEME` - Theme used until one is chosen, `light` or `dark` (default: `light`)
//! - `VITRINE_LOG_FORMAT` - `pretty` or `json` (default: `pretty`)

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use vitrine_core::Theme;

use crate::catalog::SeedPolicy;

const DEFAULT_DATA_DIR: &str = ".vitrine";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `pretty` or `json`, got `{other}`")),
        }
    }
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory for the file-backed store
    pub data_dir: PathBuf,
    /// What to do when no catalog is stored
    pub seed_policy: SeedPolicy,
    /// Theme reported until the user picks one
    pub default_theme: Theme,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            seed_policy: SeedPolicy::SeedDemo,
            default_theme: Theme::Light,
            log_format: LogFormat::Pretty,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("VITRINE_DATA_DIR")
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let seed_policy = match lookup("VITRINE_SEED_DEMO") {
            Some(raw) => {
                if parse_bool(&raw).map_err(|e| invalid("VITRINE_SEED_DEMO", e))? {
                    SeedPolicy::SeedDemo
                } else {
                    SeedPolicy::StartEmpty
                }
            }
            None => SeedPolicy::SeedDemo,
        };

        let default_theme = lookup("VITRINE_DEFAULT_THEME")
            .map(|raw| raw.parse::<Theme>())
            .transpose()
            .map_err(|e| invalid("VITRINE_DEFAULT_THEME", e.to_string()))?
            .unwrap_or_default();

        let log_format = lookup("VITRINE_LOG_FORMAT")
            .map(|raw| raw.parse::<LogFormat>())
            .transpose()
            .map_err(|e| invalid("VITRINE_LOG_FORMAT", e))?
            .unwrap_or_default();

        Ok(Self {
            data_dir,
            seed_policy,
            default_theme,
            log_format,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn invalid(key: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), reason.into())
}

/// Parse a boolean flag in any of the usual spellings.
fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(format!("expected a boolean, got `{other}`")),
    }
}
