use async_trait::async_trait;

use super::errors::FetchError;
use crate::clipping::Definition;

#[async_trait]
pub trait DefinitionPort: Send + Sync {
    /// Top-ranked definition for an already normalized word.
    ///
    /// Returns `MalformedResponse` when no candidate carries definition text.
    async fn top_definition(&self, word: &str) -> Result<Definition, FetchError>;
}
