//! # kc-infra
//!
//! Adapters behind the `kc-core` ports: Azure Table Storage and Airtable for
//! clippings and the book index, the Goodreads proxy for book metadata,
//! Wordnik for definitions, plus the in-process cache, clock and random
//! source.

pub mod airtable;
pub mod azure;
pub mod cache;
pub mod goodreads;
pub mod http;
pub mod random;
pub mod time;
pub mod wordnik;

pub use airtable::{AirtableBookIndex, AirtableClient, AirtableClippingSource};
pub use azure::{AzureBookIndex, AzureClippingSource, RequestSigner, TableClient};
pub use cache::InMemoryMetadataCache;
pub use goodreads::GoodreadsMetadataClient;
pub use random::ThreadRandom;
pub use time::SystemClock;
pub use wordnik::WordnikDefinitionClient;
