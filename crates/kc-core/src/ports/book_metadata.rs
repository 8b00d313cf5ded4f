use async_trait::async_trait;

use super::errors::FetchError;
use crate::book::BookMetadata;
use crate::ids::MetadataId;

#[async_trait]
pub trait BookMetadataPort: Send + Sync {
    async fn fetch_metadata(&self, id: &MetadataId) -> Result<BookMetadata, FetchError>;
}
