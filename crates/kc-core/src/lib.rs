//! # kc-core
//!
//! Core domain models and ports for Kindle Clippings.
//!
//! This crate contains pure domain logic without any infrastructure dependencies:
//! page labels, lookup-word normalization, shelving, and the port traits the
//! application layer talks to.

pub mod book;
pub mod clipping;
pub mod config;
pub mod ids;
pub mod ports;

// Re-export commonly used types at the crate root
pub use book::{BookSummary, CatalogEntry, ShelfBucket};
pub use clipping::{Clipping, Definition, LookupStatus, RawClippingRecord};
pub use config::AppConfig;
pub use ids::{ClippingId, MetadataId, SourceId};
