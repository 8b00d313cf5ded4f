//! Record listing over the Airtable REST API.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use kc_core::ports::FetchError;

use crate::http::{ensure_success, transport_error};

/// Quotes a value as an Airtable formula string literal.
pub fn formula_string(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Parameters of a `list records` call.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub view: Option<String>,
    pub filter_by_formula: Option<String>,
    pub sort: Vec<(String, SortDirection)>,
    pub max_records: Option<u32>,
    pub fields: Vec<String>,
}

impl ListQuery {
    fn params(&self, offset: Option<&str>) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(view) = &self.view {
            params.push(("view".to_string(), view.clone()));
        }
        if let Some(formula) = &self.filter_by_formula {
            params.push(("filterByFormula".to_string(), formula.clone()));
        }
        for (i, (field, direction)) in self.sort.iter().enumerate() {
            params.push((format!("sort[{i}][field]"), field.clone()));
            params.push((format!("sort[{i}][direction]"), direction.as_str().to_string()));
        }
        if let Some(max) = self.max_records {
            params.push(("maxRecords".to_string(), max.to_string()));
        }
        for field in &self.fields {
            params.push(("fields[]".to_string(), field.clone()));
        }
        if let Some(offset) = offset {
            params.push(("offset".to_string(), offset.to_string()));
        }
        params
    }
}

#[derive(Debug, Deserialize)]
pub struct AirtableRecord<T> {
    pub id: String,
    pub fields: T,
}

#[derive(Debug, Deserialize)]
pub struct ListPage<T> {
    pub records: Vec<AirtableRecord<T>>,
    pub offset: Option<String>,
}

pub struct AirtableClient {
    http: Client,
    api_base: String,
    api_key: Option<String>,
}

impl AirtableClient {
    pub fn new(http: Client, api_base: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub async fn list<T: DeserializeOwned>(
        &self,
        base: &str,
        table: &str,
        query: &ListQuery,
        offset: Option<&str>,
    ) -> Result<ListPage<T>, FetchError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| FetchError::Failure("Airtable API key is not configured".to_string()))?;

        let url = format!("{}/v0/{}/{}", self.api_base, base, table);
        debug!(base, table, formula = ?query.filter_by_formula, continued = offset.is_some(), "Listing records");
        let response = self
            .http
            .get(&url)
            .bearer_auth(api_key)
            .query(&query.params(offset))
            .send()
            .await
            .map_err(transport_error)?;
        let response = ensure_success(response, &url)?;
        response.json().await.map_err(FetchError::malformed)
    }

    /// Lists every page.
    pub async fn list_all<T: DeserializeOwned>(
        &self,
        base: &str,
        table: &str,
        query: &ListQuery,
    ) -> Result<Vec<AirtableRecord<T>>, FetchError> {
        let mut records = Vec::new();
        let mut offset: Option<String> = None;
        loop {
            let page = self.list::<T>(base, table, query, offset.as_deref()).await?;
            records.extend(page.records);
            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formula_string_escapes_quotes() {
        assert_eq!(formula_string(r#"The "Best" Book"#), r#""The \"Best\" Book""#);
    }

    #[test]
    fn test_params_follow_airtable_conventions() {
        let query = ListQuery {
            view: Some("Grid view".to_string()),
            filter_by_formula: Some("SEARCH(\"dune\", {Title})".to_string()),
            sort: vec![("Title".to_string(), SortDirection::Desc)],
            max_records: Some(1),
            fields: vec!["Id".to_string()],
        };

        let params = query.params(Some("itr/rec1"));
        let keys: Vec<&str> = params.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "view",
                "filterByFormula",
                "sort[0][field]",
                "sort[0][direction]",
                "maxRecords",
                "fields[]",
                "offset"
            ]
        );
        assert_eq!(params[3].1, "desc");
    }
}
