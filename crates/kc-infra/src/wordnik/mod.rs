//! Definitions from the Wordnik `word.json/{word}/definitions` endpoint.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

use kc_core::clipping::Definition;
use kc_core::ports::{DefinitionPort, FetchError};

use crate::http::{ensure_success, transport_error};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WordnikDefinition {
    text: Option<String>,
    #[serde(default)]
    attribution_text: Option<String>,
}

pub struct WordnikDefinitionClient {
    http: Client,
    api_base: String,
    api_key: Option<String>,
}

impl WordnikDefinitionClient {
    pub fn new(http: Client, api_base: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// `{api_base}/word.json/{word}/definitions` with `word` as one
    /// percent-encoded path segment.
    fn definitions_url(&self, word: &str) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.api_base).map_err(FetchError::failure)?;
        url.path_segments_mut()
            .map_err(|_| FetchError::Failure(format!("cannot append a path to {}", self.api_base)))?
            .pop_if_empty()
            .push("word.json")
            .push(word)
            .push("definitions");
        Ok(url)
    }
}

#[async_trait]
impl DefinitionPort for WordnikDefinitionClient {
    async fn top_definition(&self, word: &str) -> Result<Definition, FetchError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| FetchError::Failure("Wordnik API key is not configured".to_string()))?;

        let word = word.to_lowercase();
        let url = self.definitions_url(&word)?;
        let response = self
            .http
            .get(url.as_str())
            .query(&[
                ("limit", "1"),
                ("includeRelated", "false"),
                ("useCanonical", "true"),
                ("includeTags", "false"),
                ("api_key", key),
            ])
            .send()
            .await
            .map_err(transport_error)?;
        let definitions: Vec<WordnikDefinition> = ensure_success(response, url.as_str())?
            .json()
            .await
            .map_err(FetchError::malformed)?;

        let top = definitions
            .into_iter()
            .find_map(|d| {
                let text = d.text?.trim().to_string();
                (!text.is_empty()).then(|| Definition {
                    text,
                    attribution: d.attribution_text.unwrap_or_default().trim().to_string(),
                })
            })
            .ok_or_else(|| FetchError::malformed(format!("no definition for {word:?}")))?;
        debug!(word = %word, "Definition found");
        Ok(top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use std::time::Duration;

    fn client(server: &Server) -> WordnikDefinitionClient {
        WordnikDefinitionClient::new(
            crate::http::build_client(Duration::from_secs(5)).unwrap(),
            format!("{}/v4", server.url()),
            Some("wnKey".to_string()),
        )
    }

    #[tokio::test]
    async fn test_top_definition_sends_fixed_parameters() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v4/word.json/serendipity/definitions")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("limit".into(), "1".into()),
                Matcher::UrlEncoded("includeRelated".into(), "false".into()),
                Matcher::UrlEncoded("useCanonical".into(), "true".into()),
                Matcher::UrlEncoded("includeTags".into(), "false".into()),
                Matcher::UrlEncoded("api_key".into(), "wnKey".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"[{"text":"The faculty of making fortunate discoveries by accident.","attributionText":"from The American Heritage Dictionary","word":"serendipity"}]"#,
            )
            .create_async()
            .await;

        let definition = client(&server).top_definition("Serendipity").await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            definition,
            Definition {
                text: "The faculty of making fortunate discoveries by accident.".to_string(),
                attribution: "from The American Heritage Dictionary".to_string(),
            }
        );
    }

    #[test]
    fn test_word_is_encoded_as_one_path_segment() {
        let client = WordnikDefinitionClient::new(
            crate::http::build_client(Duration::from_secs(5)).unwrap(),
            "https://api.wordnik.com/v4/",
            None,
        );

        let url = client.definitions_url("why?").unwrap();
        assert_eq!(url.as_str(), "https://api.wordnik.com/v4/word.json/why%3F/definitions");
        assert_eq!(url.query(), None);
    }

    #[tokio::test]
    async fn test_question_mark_reaches_the_definitions_endpoint() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v4/word.json/why%3F/definitions")
            .match_query(Matcher::UrlEncoded("api_key".into(), "wnKey".into()))
            .with_status(200)
            .with_body(r#"[{"text":"For what reason.","attributionText":"from Wiktionary"}]"#)
            .create_async()
            .await;

        let definition = client(&server).top_definition("why?").await.unwrap();

        mock.assert_async().await;
        assert_eq!(definition.text, "For what reason.");
    }

    #[tokio::test]
    async fn test_skips_entries_without_text() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/v4/word.json/sietch/definitions")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"[{"attributionText":"x"},{"text":"A cave community.","attributionText":"from Wiktionary"}]"#)
            .create_async()
            .await;

        let definition = client(&server).top_definition("sietch").await.unwrap();
        assert_eq!(definition.text, "A cave community.");
    }

    #[tokio::test]
    async fn test_empty_list_and_errors_are_failures() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/v4/word.json/zzz/definitions")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;
        server
            .mock("GET", "/v4/word.json/limited/definitions")
            .match_query(Matcher::Any)
            .with_status(429)
            .create_async()
            .await;

        let client = client(&server);
        assert!(matches!(
            client.top_definition("zzz").await,
            Err(FetchError::MalformedResponse(_))
        ));
        assert!(matches!(
            client.top_definition("limited").await,
            Err(FetchError::Status { status: 429, .. })
        ));
    }
}
