//! Fakes shared by the integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use kc_core::clipping::{Definition, RawClippingRecord};
use kc_core::ports::{
    ClippingSourcePort, ContinuationToken, DefinitionPort, FetchError, RandomPort, RecordFilter,
    RecordPage,
};
use kc_core::SourceId;
use tokio::sync::Notify;

pub fn record(id: i64, title: &str, content: &str, created: &str, location: &str) -> RawClippingRecord {
    RawClippingRecord {
        id,
        title: title.to_string(),
        author: "Frank Herbert".to_string(),
        content: content.to_string(),
        created: created.to_string(),
        location: location.to_string(),
    }
}

/// In-memory partition with a loose title search, no content filtering and
/// fixed-size pages.
pub struct FakeSource {
    id: SourceId,
    records: Vec<RawClippingRecord>,
    page_size: usize,
    fail_at_page: Option<usize>,
    /// When set, the page with this index waits for a notification.
    gate: Option<(usize, Arc<Notify>)>,
    pub pages_served: Mutex<usize>,
    pub requested_ids: Mutex<Vec<i64>>,
    pub max_id_calls: Mutex<usize>,
}

impl FakeSource {
    pub fn new(id: &str, records: Vec<RawClippingRecord>) -> Self {
        Self {
            id: SourceId::from(id),
            records,
            page_size: 2,
            fail_at_page: None,
            gate: None,
            pages_served: Mutex::new(0),
            requested_ids: Mutex::new(Vec::new()),
            max_id_calls: Mutex::new(0),
        }
    }

    pub fn failing_at_page(mut self, page: usize) -> Self {
        self.fail_at_page = Some(page);
        self
    }

    pub fn gated_at_page(mut self, page: usize, gate: Arc<Notify>) -> Self {
        self.gate = Some((page, gate));
        self
    }

    fn matching(&self, filter: &RecordFilter) -> Vec<RawClippingRecord> {
        self.records
            .iter()
            .filter(|r| match filter {
                RecordFilter::TitleMatches(title) => r.title.contains(title.as_str()),
                RecordFilter::ContentContains(_) | RecordFilter::All => true,
            })
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ClippingSourcePort for FakeSource {
    fn id(&self) -> &SourceId {
        &self.id
    }

    async fn select_page(
        &self,
        filter: &RecordFilter,
        cursor: Option<&ContinuationToken>,
    ) -> Result<RecordPage, FetchError> {
        let page: usize = cursor
            .and_then(|c| c.params.first())
            .and_then(|(_, v)| v.parse().ok())
            .unwrap_or(0);

        if let Some((gated_page, gate)) = &self.gate {
            if *gated_page == page {
                gate.notified().await;
            }
        }
        *self.pages_served.lock().unwrap() += 1;
        if self.fail_at_page == Some(page) {
            return Err(FetchError::Status {
                status: 500,
                endpoint: self.id.to_string(),
            });
        }

        let matching = self.matching(filter);
        let start = page * self.page_size;
        let records: Vec<_> = matching.iter().skip(start).take(self.page_size).cloned().collect();
        let next = (start + self.page_size < matching.len())
            .then(|| ContinuationToken::new(vec![("page".to_string(), (page + 1).to_string())]));
        Ok(RecordPage { records, next })
    }

    async fn max_id(&self) -> Result<Option<i64>, FetchError> {
        *self.max_id_calls.lock().unwrap() += 1;
        Ok(self.records.iter().map(|r| r.id).max())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<RawClippingRecord>, FetchError> {
        self.requested_ids.lock().unwrap().push(id);
        Ok(self.records.iter().find(|r| r.id == id).cloned())
    }
}

/// Always picks the first source and the upper bound, recording the bounds.
#[derive(Default)]
pub struct UpperBoundRandom {
    pub ranges: Mutex<Vec<(i64, i64)>>,
}

impl RandomPort for UpperBoundRandom {
    fn pick_index(&self, _len: usize) -> usize {
        0
    }

    fn pick_in_range(&self, min: i64, max: i64) -> i64 {
        self.ranges.lock().unwrap().push((min, max));
        max
    }
}

/// Answers every word with a canned definition.
#[derive(Default)]
pub struct CannedDefinitions {
    pub words: Mutex<Vec<String>>,
}

#[async_trait]
impl DefinitionPort for CannedDefinitions {
    async fn top_definition(&self, word: &str) -> Result<Definition, FetchError> {
        self.words.lock().unwrap().push(word.to_string());
        Ok(Definition {
            text: format!("definition of {word}"),
            attribution: "from The Century Dictionary".to_string(),
        })
    }
}
