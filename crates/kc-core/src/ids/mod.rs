//! ID type wrappers for type safety.

mod id_macro;

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use id_macro::impl_string_id;

/// Source-assigned clipping identifier.
///
/// Unique within one source partition; two partitions may both hold an id `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClippingId(i64);

impl ClippingId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl Display for ClippingId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ClippingId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Name of one clipping source partition (an Azure table or an Airtable base).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceId(String);

/// External book metadata identifier (the Goodreads id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetadataId(String);

impl_string_id!(SourceId, MetadataId);
