use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use kc_core::clipping::RawClippingRecord;
use kc_core::ports::{ClippingSourcePort, ContinuationToken, FetchError, RecordFilter, RecordPage};
use kc_core::SourceId;

use super::entities::{ClippingEntity, IdEntity};
use super::table_client::{odata_string, TableClient, TableQuery};

/// One clipping table of a storage account.
pub struct AzureClippingSource {
    id: SourceId,
    table: String,
    client: Arc<TableClient>,
}

impl AzureClippingSource {
    pub fn new(table: impl Into<String>, client: Arc<TableClient>) -> Self {
        let table = table.into();
        Self {
            id: SourceId::from(format!("azure/{table}")),
            table,
            client,
        }
    }

    /// Table storage has no substring operator, so content searches scan the
    /// whole table and leave matching to the caller.
    fn query_for(filter: &RecordFilter) -> TableQuery {
        match filter {
            RecordFilter::All | RecordFilter::ContentContains(_) => TableQuery::all(),
            RecordFilter::TitleMatches(title) => {
                TableQuery::filter(format!("Title eq {}", odata_string(title)))
            }
        }
    }
}

#[async_trait]
impl ClippingSourcePort for AzureClippingSource {
    fn id(&self) -> &SourceId {
        &self.id
    }

    async fn select_page(
        &self,
        filter: &RecordFilter,
        cursor: Option<&ContinuationToken>,
    ) -> Result<RecordPage, FetchError> {
        let page = self
            .client
            .query::<ClippingEntity>(&self.table, &Self::query_for(filter), cursor)
            .await?;

        let mut records = Vec::with_capacity(page.entities.len());
        for entity in page.entities {
            match entity.into_record() {
                Ok(record) => records.push(record),
                Err(err) => warn!(table = %self.table, error = %err, "Skipping clipping entity"),
            }
        }
        Ok(RecordPage {
            records,
            next: page.next,
        })
    }

    async fn max_id(&self) -> Result<Option<i64>, FetchError> {
        let ids = self
            .client
            .query_all::<IdEntity>(&self.table, &TableQuery::all().select("Id"))
            .await?;
        let max_id = ids.iter().filter_map(|e| e.id.as_i64()).max();
        debug!(table = %self.table, rows = ids.len(), ?max_id, "Scanned clipping ids");
        Ok(max_id)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<RawClippingRecord>, FetchError> {
        let query = TableQuery::filter(format!("Id eq {}", odata_string(&id.to_string())));
        let page = self
            .client
            .query::<ClippingEntity>(&self.table, &query, None)
            .await?;
        page.entities
            .into_iter()
            .next()
            .map(ClippingEntity::into_record)
            .transpose()
    }
}
