//! Airtable adapters: one base per clipping partition plus an index base.

mod book_index;
pub mod client;
mod clipping_source;

pub use book_index::AirtableBookIndex;
pub use client::{formula_string, AirtableClient, ListQuery, SortDirection};
pub use clipping_source::AirtableClippingSource;
