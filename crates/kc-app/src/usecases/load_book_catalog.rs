//! Loads the book index and enriches every entry with provider metadata,
//! reusing the session cache where possible.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info, info_span, warn, Instrument};

use kc_core::book::{BookSummary, CatalogEntry};
use kc_core::ports::{BookIndexPort, BookMetadataPort, MetadataCachePort};

use crate::view::{until_cancelled, LiveCollection};

/// Summary of one catalog load.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CatalogReport {
    pub entries: usize,
    pub from_cache: usize,
    pub fetched: usize,
    pub failed: usize,
    pub index_failed: bool,
    pub cancelled: bool,
}

enum Resolution {
    Cached,
    Fetched,
    Failed,
    Cancelled,
}

pub struct BookCatalogLoader {
    index: Arc<dyn BookIndexPort>,
    metadata: Arc<dyn BookMetadataPort>,
    cache: Arc<dyn MetadataCachePort>,
}

impl BookCatalogLoader {
    pub fn new(
        index: Arc<dyn BookIndexPort>,
        metadata: Arc<dyn BookMetadataPort>,
        cache: Arc<dyn MetadataCachePort>,
    ) -> Self {
        Self {
            index,
            metadata,
            cache,
        }
    }

    /// Publishes one [`BookSummary`] per resolvable index entry into `books`.
    ///
    /// Entries resolve concurrently and are appended as they complete, so
    /// the collection's order is not the index order. An entry whose
    /// metadata cannot be fetched is left out.
    pub async fn execute(&self, books: &LiveCollection<BookSummary>) -> CatalogReport {
        let span = info_span!("usecase.load_book_catalog.execute");

        async {
            let mut report = CatalogReport::default();
            let entries = match until_cancelled(books.token(), self.index.list_entries()).await {
                Some(Ok(entries)) => entries,
                Some(Err(err)) => {
                    warn!(error = %err, "Failed to fetch book index");
                    report.index_failed = true;
                    return report;
                }
                None => {
                    report.cancelled = true;
                    return report;
                }
            };
            report.entries = entries.len();
            debug!(entries = entries.len(), "Book index fetched");

            let resolutions =
                join_all(entries.iter().map(|entry| self.resolve(entry, books))).await;
            for resolution in resolutions {
                match resolution {
                    Resolution::Cached => report.from_cache += 1,
                    Resolution::Fetched => report.fetched += 1,
                    Resolution::Failed => report.failed += 1,
                    Resolution::Cancelled => report.cancelled = true,
                }
            }

            info!(
                entries = report.entries,
                from_cache = report.from_cache,
                fetched = report.fetched,
                failed = report.failed,
                "Book catalog loaded"
            );
            report
        }
        .instrument(span)
        .await
    }

    async fn resolve(&self, entry: &CatalogEntry, books: &LiveCollection<BookSummary>) -> Resolution {
        let id = &entry.metadata_id;

        if let Some(book) = self.cache.get(id).await {
            debug!(metadata_id = %id, "Book metadata served from cache");
            return if books.push(book).await {
                Resolution::Cached
            } else {
                Resolution::Cancelled
            };
        }

        let metadata = match until_cancelled(books.token(), self.metadata.fetch_metadata(id)).await {
            Some(Ok(metadata)) => metadata,
            Some(Err(err)) => {
                warn!(metadata_id = %id, title = %entry.title, error = %err, "Failed to fetch book metadata");
                return Resolution::Failed;
            }
            None => return Resolution::Cancelled,
        };

        let book = BookSummary::from_metadata(metadata, entry);
        self.cache.put(id, book.clone()).await;

        if books.push(book).await {
            Resolution::Fetched
        } else {
            Resolution::Cancelled
        }
    }
}
