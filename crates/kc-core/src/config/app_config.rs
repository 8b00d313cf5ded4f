//! # Configuration DTO
//!
//! Plain data mapped from `clippings.toml`. Every section and field is
//! optional in the file; missing values take the defaults below. Secrets
//! (API keys, the storage account key) never live here, they come from the
//! environment.

use serde::{Deserialize, Serialize};

/// Which backend family serves clippings and the book index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Azure,
    Airtable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub azure: AzureConfig,
    pub airtable: AirtableConfig,
    pub goodreads: GoodreadsConfig,
    pub wordnik: WordnikConfig,
    pub definitions: DefinitionsConfig,
    pub covers: CoversConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub kind: BackendKind,
}

/// Azure Table Storage account layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AzureConfig {
    pub account: String,
    /// Overrides `https://{account}.table.core.windows.net`, e.g. for an emulator.
    pub endpoint: Option<String>,
    pub api_version: String,
    /// One table per clipping partition.
    pub clipping_tables: Vec<String>,
    pub books_table: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AirtableConfig {
    pub api_base: String,
    /// One base per clipping partition.
    pub clipping_bases: Vec<String>,
    pub clippings_table: String,
    pub index_base: String,
    pub index_table: String,
    pub view: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoodreadsConfig {
    pub proxy_base: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WordnikConfig {
    pub api_base: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefinitionsConfig {
    pub enabled: bool,
    /// Delay between consecutive definition requests of one batch.
    pub spacing_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoversConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            azure: AzureConfig::default(),
            airtable: AirtableConfig::default(),
            goodreads: GoodreadsConfig::default(),
            wordnik: WordnikConfig::default(),
            definitions: DefinitionsConfig::default(),
            covers: CoversConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::Azure,
        }
    }
}

impl Default for AzureConfig {
    fn default() -> Self {
        Self {
            account: "kindleclippings".to_string(),
            endpoint: None,
            api_version: "2021-04-10".to_string(),
            clipping_tables: vec!["clippings".to_string()],
            books_table: "books".to_string(),
        }
    }
}

impl Default for AirtableConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.airtable.com".to_string(),
            clipping_bases: Vec::new(),
            clippings_table: "Clippings".to_string(),
            index_base: String::new(),
            index_table: "Index".to_string(),
            view: "Grid view".to_string(),
        }
    }
}

impl Default for GoodreadsConfig {
    fn default() -> Self {
        Self {
            proxy_base: "https://goodreads-proxy.azurewebsites.net".to_string(),
        }
    }
}

impl Default for WordnikConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.wordnik.com/v4".to_string(),
        }
    }
}

impl Default for DefinitionsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            spacing_secs: 10,
        }
    }
}

impl Default for CoversConfig {
    fn default() -> Self {
        Self {
            base_url: "https://kindleclippings.blob.core.windows.net/hires-book-covers".to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl AppConfig {
    /// Parses a TOML document. No validation beyond the shape of the data.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Base URL of the Azure table service.
    pub fn azure_table_endpoint(&self) -> String {
        self.azure
            .endpoint
            .clone()
            .unwrap_or_else(|| format!("https://{}.table.core.windows.net", self.azure.account))
    }
}
