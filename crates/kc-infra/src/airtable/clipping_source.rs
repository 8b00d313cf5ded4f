use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use kc_core::clipping::RawClippingRecord;
use kc_core::ports::{ClippingSourcePort, ContinuationToken, FetchError, RecordFilter, RecordPage};
use kc_core::SourceId;

use super::client::{formula_string, AirtableClient, AirtableRecord, ListQuery, SortDirection};
use crate::azure::entities::LooseId;

const OFFSET_PARAM: &str = "offset";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ClippingFields {
    id: Option<LooseId>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    created: String,
    #[serde(default)]
    location: String,
}

impl ClippingFields {
    fn into_record(self) -> Option<RawClippingRecord> {
        Some(RawClippingRecord {
            id: self.id?.as_i64()?,
            title: self.title,
            author: self.author,
            content: self.content,
            created: self.created,
            location: self.location,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct IdFields {
    id: Option<LooseId>,
}

/// The clippings table of one Airtable base.
pub struct AirtableClippingSource {
    id: SourceId,
    base: String,
    table: String,
    view: String,
    client: Arc<AirtableClient>,
}

impl AirtableClippingSource {
    pub fn new(
        base: impl Into<String>,
        table: impl Into<String>,
        view: impl Into<String>,
        client: Arc<AirtableClient>,
    ) -> Self {
        let base = base.into();
        Self {
            id: SourceId::from(format!("airtable/{base}")),
            base,
            table: table.into(),
            view: view.into(),
            client,
        }
    }

    fn query_for(&self, filter: &RecordFilter) -> ListQuery {
        let mut query = ListQuery {
            view: Some(self.view.clone()),
            ..ListQuery::default()
        };
        match filter {
            RecordFilter::All => {}
            RecordFilter::TitleMatches(title) => {
                query.filter_by_formula = Some(format!("SEARCH({}, {{Title}})", formula_string(title)));
            }
            RecordFilter::ContentContains(text) => {
                query.filter_by_formula = Some(format!(
                    "SEARCH({}, LOWER({{Content}}))",
                    formula_string(&text.to_lowercase())
                ));
                query.sort = vec![("Title".to_string(), SortDirection::Desc)];
            }
        }
        query
    }

    fn records(&self, page: Vec<AirtableRecord<ClippingFields>>) -> Vec<RawClippingRecord> {
        page.into_iter()
            .filter_map(|record| {
                let id = record.id;
                let converted = record.fields.into_record();
                if converted.is_none() {
                    warn!(base = %self.base, record = %id, "Skipping record without numeric Id");
                }
                converted
            })
            .collect()
    }
}

#[async_trait]
impl ClippingSourcePort for AirtableClippingSource {
    fn id(&self) -> &SourceId {
        &self.id
    }

    async fn select_page(
        &self,
        filter: &RecordFilter,
        cursor: Option<&ContinuationToken>,
    ) -> Result<RecordPage, FetchError> {
        let offset = cursor.and_then(|c| {
            c.params
                .iter()
                .find(|(k, _)| k == OFFSET_PARAM)
                .map(|(_, v)| v.as_str())
        });
        let page = self
            .client
            .list::<ClippingFields>(&self.base, &self.table, &self.query_for(filter), offset)
            .await?;

        Ok(RecordPage {
            records: self.records(page.records),
            next: page
                .offset
                .map(|offset| ContinuationToken::new(vec![(OFFSET_PARAM.to_string(), offset)])),
        })
    }

    async fn max_id(&self) -> Result<Option<i64>, FetchError> {
        let query = ListQuery {
            sort: vec![("Id".to_string(), SortDirection::Desc)],
            max_records: Some(1),
            fields: vec!["Id".to_string()],
            ..ListQuery::default()
        };
        let page = self
            .client
            .list::<IdFields>(&self.base, &self.table, &query, None)
            .await?;
        Ok(page
            .records
            .into_iter()
            .filter_map(|r| r.fields.id.and_then(|id| id.as_i64()))
            .max())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<RawClippingRecord>, FetchError> {
        let query = ListQuery {
            filter_by_formula: Some(format!("{{Id}} = {id}")),
            max_records: Some(1),
            ..ListQuery::default()
        };
        let page = self
            .client
            .list::<ClippingFields>(&self.base, &self.table, &query, None)
            .await?;
        Ok(self.records(page.records).into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use std::time::Duration;

    fn source(api_base: String) -> AirtableClippingSource {
        let client = AirtableClient::new(
            crate::http::build_client(Duration::from_secs(5)).unwrap(),
            api_base,
            Some("keyTest".to_string()),
        );
        AirtableClippingSource::new("appBase1", "Clippings", "Grid view", Arc::new(client))
    }

    #[tokio::test]
    async fn test_title_search_pages_with_offset() {
        let mut server = Server::new_async().await;
        let first = server
            .mock("GET", "/v0/appBase1/Clippings")
            .match_header("authorization", "Bearer keyTest")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("view".into(), "Grid view".into()),
                Matcher::UrlEncoded("filterByFormula".into(), "SEARCH(\"Dune\", {Title})".into()),
                // First page only: no trailing offset.
                Matcher::Regex("%7BTitle%7D%29$".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{"records":[{"id":"rec1","fields":{"Id":1,"Title":"Dune","Content":"Spice","Created":"1/2/2017 3:04 PM","Location":"1503"}}],"offset":"itr1/rec1"}"#,
            )
            .create_async()
            .await;

        let source = source(server.url());
        let page = source
            .select_page(&RecordFilter::TitleMatches("Dune".to_string()), None)
            .await
            .unwrap();

        first.assert_async().await;
        assert_eq!(page.records[0].id, 1);
        let next = page.next.unwrap();
        assert_eq!(next.params, vec![("offset".to_string(), "itr1/rec1".to_string())]);

        let second = server
            .mock("GET", "/v0/appBase1/Clippings")
            .match_query(Matcher::UrlEncoded("offset".into(), "itr1/rec1".into()))
            .with_status(200)
            .with_body(r#"{"records":[{"id":"rec2","fields":{"Title":"Dune"}}]}"#)
            .create_async()
            .await;
        let page = source
            .select_page(&RecordFilter::TitleMatches("Dune".to_string()), Some(&next))
            .await
            .unwrap();

        second.assert_async().await;
        assert!(page.records.is_empty());
        assert!(page.next.is_none());
    }

    #[tokio::test]
    async fn test_content_search_lowercases_and_sorts_by_title_desc() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v0/appBase1/Clippings")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded(
                    "filterByFormula".into(),
                    "SEARCH(\"spice\", LOWER({Content}))".into(),
                ),
                Matcher::UrlEncoded("sort[0][field]".into(), "Title".into()),
                Matcher::UrlEncoded("sort[0][direction]".into(), "desc".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"records":[]}"#)
            .create_async()
            .await;

        source(server.url())
            .select_page(&RecordFilter::ContentContains("SPICE".to_string()), None)
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_max_id_and_find_by_id() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/v0/appBase1/Clippings")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("sort[0][field]".into(), "Id".into()),
                Matcher::UrlEncoded("maxRecords".into(), "1".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"records":[{"id":"rec9","fields":{"Id":6862}}]}"#)
            .create_async()
            .await;
        server
            .mock("GET", "/v0/appBase1/Clippings")
            .match_query(Matcher::UrlEncoded("filterByFormula".into(), "{Id} = 17".into()))
            .with_status(200)
            .with_body(r#"{"records":[{"id":"rec17","fields":{"Id":17,"Title":"Dune","Content":"Sietch"}}]}"#)
            .create_async()
            .await;

        let source = source(server.url());
        assert_eq!(source.max_id().await.unwrap(), Some(6862));
        let found = source.find_by_id(17).await.unwrap().unwrap();
        assert_eq!(found.content, "Sietch");
    }
}
