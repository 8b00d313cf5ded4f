//! Port interfaces for the application layer
//!
//! Ports define the contract between the aggregation use cases and the
//! backends they consume (clipping stores, book index, metadata and
//! definition providers). Infrastructure implements them; tests substitute
//! fakes.

mod book_index;
mod book_metadata;
mod clipping_source;
mod clock;
mod definition;
pub mod errors;
mod metadata_cache;
mod random;

pub use book_index::BookIndexPort;
pub use book_metadata::BookMetadataPort;
pub use clipping_source::{ClippingSourcePort, ContinuationToken, RecordFilter, RecordPage};
pub use clock::ClockPort;
pub use definition::DefinitionPort;
pub use errors::FetchError;
pub use metadata_cache::MetadataCachePort;
pub use random::RandomPort;
