use async_trait::async_trait;

use super::errors::FetchError;
use crate::book::CatalogEntry;

#[async_trait]
pub trait BookIndexPort: Send + Sync {
    /// Every index entry, ordered by title. Pagination is the adapter's concern.
    async fn list_entries(&self) -> Result<Vec<CatalogEntry>, FetchError>;
}
