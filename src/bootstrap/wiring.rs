//! # Dependency injection
//!
//! The only place that knows every crate at once: builds the adapters
//! chosen by `AppConfig`, hands them to the use cases as port trait objects,
//! and makes no decisions beyond that.

use std::sync::Arc;
use std::time::Duration;

use kc_app::{BookCatalogLoader, ClippingAggregator, ClippingSources, DefinitionThrottler};
use kc_core::config::BackendKind;
use kc_core::ports::{
    BookIndexPort, BookMetadataPort, ClippingSourcePort, DefinitionPort, MetadataCachePort,
    RandomPort,
};
use kc_core::AppConfig;
use kc_infra::azure::{AzureBookIndex, AzureClippingSource, RequestSigner, TableClient};
use kc_infra::airtable::{AirtableBookIndex, AirtableClient, AirtableClippingSource};
use kc_infra::{
    GoodreadsMetadataClient, InMemoryMetadataCache, SystemClock, ThreadRandom,
    WordnikDefinitionClient,
};
use tracing::{info, warn};

use super::config::Secrets;

pub type WiringResult<T> = Result<T, WiringError>;

#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("HTTP client initialization failed: {0}")]
    HttpClient(String),

    #[error("no clipping sources configured for the {0:?} backend")]
    NoSources(BackendKind),
}

/// Everything the commands need, behind port traits.
pub struct AppDeps {
    pub sources: ClippingSources,
    pub book_index: Arc<dyn BookIndexPort>,
    pub metadata: Arc<dyn BookMetadataPort>,
    pub cache: Arc<dyn MetadataCachePort>,
    pub random: Arc<dyn RandomPort>,
    /// `None` when lookups are switched off.
    pub throttler: Option<Arc<DefinitionThrottler>>,
    pub cover_base_url: String,
}

impl AppDeps {
    pub fn aggregator(&self) -> ClippingAggregator {
        ClippingAggregator::new(
            self.sources.clone(),
            Arc::clone(&self.random),
            self.throttler.clone(),
        )
    }

    pub fn catalog_loader(&self) -> BookCatalogLoader {
        BookCatalogLoader::new(
            Arc::clone(&self.book_index),
            Arc::clone(&self.metadata),
            Arc::clone(&self.cache),
        )
    }
}

/// Builds the dependency graph for `config`.
///
/// `definitions_enabled` is the command-line switch; lookups run only when
/// both it and `[definitions] enabled` allow them.
pub fn wire_dependencies(
    config: &AppConfig,
    secrets: &Secrets,
    definitions_enabled: bool,
) -> WiringResult<AppDeps> {
    let http = kc_infra::http::build_client(Duration::from_secs(config.http.timeout_secs))
        .map_err(|e| WiringError::HttpClient(e.to_string()))?;

    let (sources, book_index): (Vec<Arc<dyn ClippingSourcePort>>, Arc<dyn BookIndexPort>) =
        match config.backend.kind {
            BackendKind::Azure => {
                if secrets.azure_storage_key.is_none() {
                    warn!("AZURE_STORAGE_KEY is not set, table requests will not be signed");
                }
                let client = Arc::new(TableClient::new(
                    http.clone(),
                    config.azure_table_endpoint(),
                    config.azure.api_version.clone(),
                    RequestSigner::new(config.azure.account.clone(), secrets.azure_storage_key.clone()),
                    Arc::new(SystemClock),
                ));
                let sources: Vec<Arc<dyn ClippingSourcePort>> = config
                    .azure
                    .clipping_tables
                    .iter()
                    .map(|table| {
                        Arc::new(AzureClippingSource::new(table.clone(), Arc::clone(&client)))
                            as Arc<dyn ClippingSourcePort>
                    })
                    .collect();
                let index: Arc<dyn BookIndexPort> = Arc::new(AzureBookIndex::new(config.azure.books_table.clone(), client));
                (sources, index)
            }
            BackendKind::Airtable => {
                if secrets.airtable_api_key.is_none() {
                    warn!("AIRTABLE_API_KEY is not set, Airtable requests will fail");
                }
                let client = Arc::new(AirtableClient::new(
                    http.clone(),
                    config.airtable.api_base.clone(),
                    secrets.airtable_api_key.clone(),
                ));
                let sources: Vec<Arc<dyn ClippingSourcePort>> = config
                    .airtable
                    .clipping_bases
                    .iter()
                    .map(|base| {
                        Arc::new(AirtableClippingSource::new(
                            base.clone(),
                            config.airtable.clippings_table.clone(),
                            config.airtable.view.clone(),
                            Arc::clone(&client),
                        )) as Arc<dyn ClippingSourcePort>
                    })
                    .collect();
                let index: Arc<dyn BookIndexPort> = Arc::new(AirtableBookIndex::new(
                    config.airtable.index_base.clone(),
                    config.airtable.index_table.clone(),
                    config.airtable.view.clone(),
                    client,
                ));
                (sources, index)
            }
        };

    if sources.is_empty() {
        return Err(WiringError::NoSources(config.backend.kind));
    }

    let metadata = Arc::new(GoodreadsMetadataClient::new(
        http.clone(),
        config.goodreads.proxy_base.clone(),
        secrets.goodreads_api_key.clone(),
    ));

    let throttler = if definitions_enabled && config.definitions.enabled {
        let definitions: Arc<dyn DefinitionPort> = Arc::new(WordnikDefinitionClient::new(
            http,
            config.wordnik.api_base.clone(),
            secrets.wordnik_api_key.clone(),
        ));
        Some(Arc::new(DefinitionThrottler::new(
            definitions,
            Duration::from_secs(config.definitions.spacing_secs),
        )))
    } else {
        None
    };

    info!(
        backend = ?config.backend.kind,
        sources = sources.len(),
        definitions = throttler.is_some(),
        "Dependencies wired"
    );

    Ok(AppDeps {
        sources: ClippingSources::new(sources),
        book_index,
        metadata,
        cache: Arc::new(InMemoryMetadataCache::new()),
        random: Arc::new(ThreadRandom),
        throttler,
        cover_base_url: config.covers.base_url.clone(),
    })
}
