use serde::{Deserialize, Serialize};

use crate::ids::MetadataId;

/// One row of the book index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Title exactly as the clippings carry it; the join key.
    pub title: String,
    pub metadata_id: MetadataId,
}

/// Fields extracted from the metadata provider for one book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookMetadata {
    pub id: String,
    pub title: String,
    pub author: String,
    pub image_url: String,
    /// HTML; empty when the provider has none.
    pub description: String,
}

/// A catalog entry merged with its resolved metadata.
///
/// `original_title` is the only reliable join key to clippings; `title` is
/// the provider's display title and may carry a subtitle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSummary {
    pub id: String,
    pub title: String,
    pub original_title: String,
    pub author: String,
    pub image_url: String,
    pub description: String,
}

impl BookSummary {
    pub fn from_metadata(metadata: BookMetadata, entry: &CatalogEntry) -> Self {
        Self {
            id: metadata.id,
            title: metadata.title,
            original_title: entry.title.clone(),
            author: metadata.author,
            image_url: metadata.image_url,
            description: metadata.description,
        }
    }
}
