//! Signed queries against the Azure Table service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use kc_core::ports::{ClockPort, ContinuationToken, FetchError};

use super::entities::EntitySet;
use super::signer::RequestSigner;
use crate::http::{ensure_success, transport_error};

const NEXT_PARTITION_KEY_HEADER: &str = "x-ms-continuation-NextPartitionKey";
const NEXT_ROW_KEY_HEADER: &str = "x-ms-continuation-NextRowKey";
const NEXT_PARTITION_KEY_PARAM: &str = "NextPartitionKey";
const NEXT_ROW_KEY_PARAM: &str = "NextRowKey";
const NOMETADATA: &str = "application/json;odata=nometadata";

/// Quotes a value for an OData `$filter` expression.
pub fn odata_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// `$filter` and `$select` of one table query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableQuery {
    pub filter: Option<String>,
    pub select: Option<String>,
}

impl TableQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn filter(expression: impl Into<String>) -> Self {
        Self {
            filter: Some(expression.into()),
            select: None,
        }
    }

    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.select = Some(columns.into());
        self
    }
}

#[derive(Debug)]
pub struct EntityPage<T> {
    pub entities: Vec<T>,
    pub next: Option<ContinuationToken>,
}

pub struct TableClient {
    http: Client,
    endpoint: String,
    api_version: String,
    signer: RequestSigner,
    clock: Arc<dyn ClockPort>,
}

impl TableClient {
    pub fn new(
        http: Client,
        endpoint: impl Into<String>,
        api_version: impl Into<String>,
        signer: RequestSigner,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_version: api_version.into(),
            signer,
            clock,
        }
    }

    /// Fetches one page of `table`. The request is not sent when it cannot
    /// be signed.
    pub async fn query<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &TableQuery,
        cursor: Option<&ContinuationToken>,
    ) -> Result<EntityPage<T>, FetchError> {
        let now = DateTime::<Utc>::from_timestamp_millis(self.clock.now_ms()).unwrap_or_else(Utc::now);
        let signed = self.signer.sign_table(table, now)?;

        let url = format!("{}/{}()", self.endpoint, table);
        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(filter) = &query.filter {
            params.push(("$filter", filter.as_str()));
        }
        if let Some(select) = &query.select {
            params.push(("$select", select.as_str()));
        }
        if let Some(cursor) = cursor {
            params.extend(cursor.params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        debug!(table, filter = ?query.filter, continued = cursor.is_some(), "Querying table");
        let response = self
            .http
            .get(&url)
            .query(&params)
            .header(AUTHORIZATION, self.signer.authorization(&signed))
            .header("x-ms-date", &signed.date)
            .header("x-ms-version", &self.api_version)
            .header(ACCEPT, NOMETADATA)
            .send()
            .await
            .map_err(transport_error)?;
        let response = ensure_success(response, &url)?;

        let next = continuation(response.headers());
        let body: EntitySet<T> = response.json().await.map_err(FetchError::malformed)?;
        Ok(EntityPage {
            entities: body.value,
            next,
        })
    }

    /// Follows continuations until the table is exhausted.
    pub async fn query_all<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &TableQuery,
    ) -> Result<Vec<T>, FetchError> {
        let mut entities = Vec::new();
        let mut cursor: Option<ContinuationToken> = None;
        loop {
            let page = self.query::<T>(table, query, cursor.as_ref()).await?;
            entities.extend(page.entities);
            match page.next {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }
        Ok(entities)
    }
}

fn continuation(headers: &HeaderMap) -> Option<ContinuationToken> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let partition = header(NEXT_PARTITION_KEY_HEADER);
    let row = header(NEXT_ROW_KEY_HEADER);
    if partition.is_none() && row.is_some() {
        warn!("Row continuation without partition continuation, ignoring");
        return None;
    }

    let mut params = Vec::new();
    if let Some(partition) = partition {
        params.push((NEXT_PARTITION_KEY_PARAM.to_string(), partition));
    }
    if let Some(row) = row {
        params.push((NEXT_ROW_KEY_PARAM.to_string(), row));
    }
    (!params.is_empty()).then(|| ContinuationToken::new(params))
}
