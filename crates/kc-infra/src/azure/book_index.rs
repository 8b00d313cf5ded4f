use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use kc_core::ports::{BookIndexPort, FetchError};
use kc_core::{CatalogEntry, MetadataId};

use super::entities::BookEntity;
use super::table_client::{TableClient, TableQuery};

/// The table listing every book with its Goodreads id.
pub struct AzureBookIndex {
    table: String,
    client: Arc<TableClient>,
}

impl AzureBookIndex {
    pub fn new(table: impl Into<String>, client: Arc<TableClient>) -> Self {
        Self {
            table: table.into(),
            client,
        }
    }
}

#[async_trait]
impl BookIndexPort for AzureBookIndex {
    async fn list_entries(&self) -> Result<Vec<CatalogEntry>, FetchError> {
        let books = self
            .client
            .query_all::<BookEntity>(&self.table, &TableQuery::all().select("Title,GoodreadsId"))
            .await?;

        let mut entries: Vec<CatalogEntry> = books
            .into_iter()
            .filter_map(|book| match book.goodreads_id {
                Some(id) if !book.title.trim().is_empty() => Some(CatalogEntry {
                    title: book.title.trim().to_string(),
                    metadata_id: MetadataId::from(id.into_text()),
                }),
                _ => {
                    warn!(title = %book.title, "Index row without title or Goodreads id");
                    None
                }
            })
            .collect();
        entries.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(entries)
    }
}
