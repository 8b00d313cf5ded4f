//! Session-scoped metadata cache.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use kc_core::ports::MetadataCachePort;
use kc_core::{BookSummary, MetadataId};

/// Keeps enriched books for the lifetime of the process.
#[derive(Default)]
pub struct InMemoryMetadataCache {
    books: RwLock<HashMap<MetadataId, BookSummary>>,
}

impl InMemoryMetadataCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }
}

#[async_trait]
impl MetadataCachePort for InMemoryMetadataCache {
    async fn get(&self, id: &MetadataId) -> Option<BookSummary> {
        self.books.read().await.get(id).cloned()
    }

    async fn put(&self, id: &MetadataId, book: BookSummary) {
        self.books.write().await.insert(id.clone(), book);
    }
}
