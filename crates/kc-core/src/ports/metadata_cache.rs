use async_trait::async_trait;

use crate::book::BookSummary;
use crate::ids::MetadataId;

/// Session-scoped store of enriched books keyed by metadata id.
///
/// Writes are idempotent: the same id always maps to the same summary.
#[async_trait]
pub trait MetadataCachePort: Send + Sync {
    async fn get(&self, id: &MetadataId) -> Option<BookSummary>;
    async fn put(&self, id: &MetadataId, book: BookSummary);
}
