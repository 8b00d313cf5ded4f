//! Book catalog domain: index entries, enriched summaries, shelving, covers.

pub mod cover;
mod model;
pub mod shelf;

pub use cover::book_cover_url;
pub use model::{BookMetadata, BookSummary, CatalogEntry};
pub use shelf::{comparison_title, shelve, ShelfBucket};
