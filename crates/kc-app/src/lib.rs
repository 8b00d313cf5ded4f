//! Kindle Clippings application layer
//!
//! Use cases that aggregate clippings, throttle definition lookups and load
//! the book catalog, plus the view scope they publish into.

pub mod usecases;
pub mod view;

pub use usecases::{
    AggregationReport, BookCatalogLoader, CatalogReport, ClippingAggregator, ClippingScope,
    ClippingSources, DefinitionLookupTask, DefinitionThrottler, LookupOutcome, ScheduledLookups,
};
pub use view::{CatalogView, ClippingBoard, ClippingView, LiveCollection, LiveView, ViewScope};
