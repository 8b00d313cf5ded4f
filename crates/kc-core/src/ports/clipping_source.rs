use async_trait::async_trait;

use super::errors::FetchError;
use crate::clipping::RawClippingRecord;
use crate::ids::SourceId;

/// Provider-side pre-filter.
///
/// Sources may apply it loosely (substring search, tokenized match) or not at
/// all; callers always re-check the records they get back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordFilter {
    All,
    TitleMatches(String),
    ContentContains(String),
}

/// Opaque cursor for the next page, as query parameters to send back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuationToken {
    pub params: Vec<(String, String)>,
}

impl ContinuationToken {
    pub fn new(params: Vec<(String, String)>) -> Self {
        Self { params }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordPage {
    pub records: Vec<RawClippingRecord>,
    pub next: Option<ContinuationToken>,
}

/// One partition of clipping records.
#[async_trait]
pub trait ClippingSourcePort: Send + Sync {
    fn id(&self) -> &SourceId;

    /// Returns one page of records for `filter`, starting at `cursor`.
    async fn select_page(
        &self,
        filter: &RecordFilter,
        cursor: Option<&ContinuationToken>,
    ) -> Result<RecordPage, FetchError>;

    /// Largest record id in the partition, `None` when it is empty.
    async fn max_id(&self) -> Result<Option<i64>, FetchError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<RawClippingRecord>, FetchError>;
}
