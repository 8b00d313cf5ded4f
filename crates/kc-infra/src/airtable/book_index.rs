use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use kc_core::ports::{BookIndexPort, FetchError};
use kc_core::{CatalogEntry, MetadataId};

use super::client::{AirtableClient, ListQuery, SortDirection};
use crate::azure::entities::LooseId;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct IndexFields {
    #[serde(default)]
    title: String,
    goodreads_id: Option<LooseId>,
}

/// The index table mapping titles to Goodreads ids.
pub struct AirtableBookIndex {
    base: String,
    table: String,
    view: String,
    client: Arc<AirtableClient>,
}

impl AirtableBookIndex {
    pub fn new(
        base: impl Into<String>,
        table: impl Into<String>,
        view: impl Into<String>,
        client: Arc<AirtableClient>,
    ) -> Self {
        Self {
            base: base.into(),
            table: table.into(),
            view: view.into(),
            client,
        }
    }
}

#[async_trait]
impl BookIndexPort for AirtableBookIndex {
    async fn list_entries(&self) -> Result<Vec<CatalogEntry>, FetchError> {
        let query = ListQuery {
            view: Some(self.view.clone()),
            sort: vec![("Title".to_string(), SortDirection::Asc)],
            ..ListQuery::default()
        };
        let records = self
            .client
            .list_all::<IndexFields>(&self.base, &self.table, &query)
            .await?;

        Ok(records
            .into_iter()
            .filter_map(|record| match record.fields.goodreads_id {
                Some(id) if !record.fields.title.trim().is_empty() => Some(CatalogEntry {
                    title: record.fields.title.trim().to_string(),
                    metadata_id: MetadataId::from(id.into_text()),
                }),
                _ => {
                    warn!(record = %record.id, "Index record without title or Goodreads id");
                    None
                }
            })
            .collect())
    }
}
