//! Business logic use cases
//!
//! ```text
//! BookCatalogLoader ──► CatalogView (shelved books)
//!
//! ClippingAggregator ──► ClippingView (clippings)
//!         │
//!         └─ after the whole scope is fetched ─► DefinitionThrottler
//!                                                  └─ SpacedSchedule
//! ```

pub mod aggregate_clippings;
pub mod definition_throttler;
pub mod load_book_catalog;
pub mod spaced_schedule;

pub use aggregate_clippings::{AggregationReport, ClippingAggregator, ClippingScope, ClippingSources};
pub use definition_throttler::{
    DefinitionLookupTask, DefinitionThrottler, LookupOutcome, ScheduledLookups,
};
pub use load_book_catalog::{BookCatalogLoader, CatalogReport};
pub use spaced_schedule::SpacedSchedule;
