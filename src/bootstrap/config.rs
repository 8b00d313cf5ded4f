//! # Configuration loader
//!
//! Reads `clippings.toml` into the `AppConfig` DTO and collects the secrets
//! the adapters need from the environment. No validation happens here; the
//! wiring step decides what a configuration can build.

use std::path::Path;

use anyhow::Context;
use kc_core::AppConfig;
use tracing::info;

pub const AZURE_STORAGE_KEY: &str = "AZURE_STORAGE_KEY";
pub const AIRTABLE_API_KEY: &str = "AIRTABLE_API_KEY";
pub const GOODREADS_API_KEY: &str = "GOODREADS_API_KEY";
pub const WORDNIK_API_KEY: &str = "WORDNIK_API_KEY";

/// Loads configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read, or if its content
/// is not valid TOML for `AppConfig`.
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    if !config_path.exists() {
        info!(path = %config_path.display(), "No config file, using defaults");
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    AppConfig::from_toml_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
}

/// API keys and the storage account key. Empty values count as missing.
#[derive(Clone, Default)]
pub struct Secrets {
    pub azure_storage_key: Option<String>,
    pub airtable_api_key: Option<String>,
    pub goodreads_api_key: Option<String>,
    pub wordnik_api_key: Option<String>,
}

impl Secrets {
    /// Reads the process environment (after `.env` has been applied).
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        Self {
            azure_storage_key: read(AZURE_STORAGE_KEY),
            airtable_api_key: read(AIRTABLE_API_KEY),
            goodreads_api_key: read(GOODREADS_API_KEY),
            wordnik_api_key: read(WORDNIK_API_KEY),
        }
    }
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let present = |v: &Option<String>| v.as_ref().map(|_| "<set>");
        f.debug_struct("Secrets")
            .field("azure_storage_key", &present(&self.azure_storage_key))
            .field("airtable_api_key", &present(&self.airtable_api_key))
            .field("goodreads_api_key", &present(&self.goodreads_api_key))
            .field("wordnik_api_key", &present(&self.wordnik_api_key))
            .finish()
    }
}
