//! Book metadata from the Goodreads `book/show` endpoint, reached through a
//! CORS proxy that forwards `{proxy}/book/show/{id}/{key}`.

mod parser;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use kc_core::book::BookMetadata;
use kc_core::ports::{BookMetadataPort, FetchError};
use kc_core::MetadataId;

use crate::http::{ensure_success, transport_error};

pub use parser::parse_book;

pub struct GoodreadsMetadataClient {
    http: Client,
    proxy_base: String,
    api_key: Option<String>,
}

impl GoodreadsMetadataClient {
    pub fn new(http: Client, proxy_base: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            proxy_base: proxy_base.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }
}

#[async_trait]
impl BookMetadataPort for GoodreadsMetadataClient {
    async fn fetch_metadata(&self, id: &MetadataId) -> Result<BookMetadata, FetchError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| FetchError::Failure("Goodreads API key is not configured".to_string()))?;

        let url = format!("{}/book/show/{}/{}", self.proxy_base, id, key);
        let endpoint = format!("{}/book/show/{}", self.proxy_base, id);
        debug!(metadata_id = %id, "Fetching book metadata");

        let response = self.http.get(&url).send().await.map_err(transport_error)?;
        let xml = ensure_success(response, &endpoint)?
            .text()
            .await
            .map_err(transport_error)?;
        parse_book(&xml)
    }
}
