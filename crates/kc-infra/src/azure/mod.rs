//! Azure Table Storage adapters.

mod book_index;
mod clipping_source;
pub mod entities;
pub mod signer;
pub mod table_client;

pub use book_index::AzureBookIndex;
pub use clipping_source::AzureClippingSource;
pub use signer::{sign, RequestSigner, SignedRequest};
pub use table_client::{odata_string, EntityPage, TableClient, TableQuery};
