//! Fetches the clippings of one scope into a view and hands single-word
//! clippings to the definition throttler once the scope is complete.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Mutex;
use tracing::{debug, info, info_span, warn, Instrument};

use kc_core::clipping::{contains_ignore_case, normalize_record, Clipping, ClippingKey};
use kc_core::ports::{ClippingSourcePort, FetchError, RandomPort, RecordFilter};
use kc_core::SourceId;

use super::definition_throttler::{DefinitionThrottler, ScheduledLookups};
use crate::view::{until_cancelled, ClippingBoard};

/// The clipping partitions an aggregator reads from.
#[derive(Clone, Default)]
pub struct ClippingSources(Vec<Arc<dyn ClippingSourcePort>>);

impl ClippingSources {
    pub fn new(sources: Vec<Arc<dyn ClippingSourcePort>>) -> Self {
        Self(sources)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn ClippingSourcePort>> {
        self.0.iter()
    }
}

/// Which clippings an aggregation run retrieves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClippingScope {
    /// Every clipping whose title equals the book's original title.
    ByBook { original_title: String },
    /// One uniformly random clipping from one random source.
    Random,
    /// Every clipping whose content contains the query, ignoring case.
    ByKeyword { query: String },
}

/// Summary of one aggregation run. A run never fails as a whole.
#[derive(Debug, Default)]
pub struct AggregationReport {
    /// Clippings published to the board.
    pub published: usize,
    pub failed_sources: Vec<SourceId>,
    pub cancelled: bool,
    pub lookups: ScheduledLookups,
}

/// A run's report plus the scope's clippings in lookup order.
type Fetched = (AggregationReport, Vec<ClippingKey>);

struct SourceScan {
    clippings: Vec<Clipping>,
    error: Option<FetchError>,
    cancelled: bool,
}

pub struct ClippingAggregator {
    sources: ClippingSources,
    random: Arc<dyn RandomPort>,
    throttler: Option<Arc<DefinitionThrottler>>,
    /// Largest id per source, looked up once per session.
    max_ids: Mutex<HashMap<SourceId, i64>>,
}

impl ClippingAggregator {
    pub fn new(
        sources: ClippingSources,
        random: Arc<dyn RandomPort>,
        throttler: Option<Arc<DefinitionThrottler>>,
    ) -> Self {
        Self {
            sources,
            random,
            throttler,
            max_ids: Mutex::new(HashMap::new()),
        }
    }

    /// Runs one scope into `board`, then schedules definition lookups for the
    /// eligible clippings it published.
    ///
    /// Lookups follow the scope's own order (creation time for a book, source
    /// then scan position for a keyword search), never the order in which
    /// pages arrived, so a scope always gets the same schedule.
    pub async fn execute(&self, scope: &ClippingScope, board: &ClippingBoard) -> AggregationReport {
        let span = info_span!("usecase.aggregate_clippings.execute", scope = ?scope);

        async {
            let (mut report, order) = match scope {
                ClippingScope::ByBook { original_title } => self.by_book(original_title, board).await,
                ClippingScope::Random => self.random(board).await,
                ClippingScope::ByKeyword { query } => self.by_keyword(query, board).await,
            };

            report.cancelled |= board.is_closed();
            if report.cancelled {
                info!("View torn down during aggregation");
                return report;
            }

            if let Some(throttler) = &self.throttler {
                report.lookups = throttler.schedule(board, &order).await;
            }
            info!(
                published = report.published,
                failed_sources = report.failed_sources.len(),
                lookups = report.lookups.len(),
                "Aggregation finished"
            );
            report
        }
        .instrument(span)
        .await
    }

    async fn by_book(&self, original_title: &str, board: &ClippingBoard) -> Fetched {
        let filter = RecordFilter::TitleMatches(original_title.to_string());
        // The pre-filter may be a loose search; only exact titles belong to the book.
        let keep = |c: &Clipping| c.title == original_title;
        let scans = join_all(
            self.sources
                .iter()
                .map(|source| scan_source(source.as_ref(), &filter, board, &keep, false)),
        )
        .await;

        let mut report = AggregationReport::default();
        let mut clippings = Vec::new();
        for (source, scan) in self.sources.iter().zip(scans) {
            record_scan(&mut report, source.id(), &scan);
            clippings.extend(scan.clippings);
        }
        clippings.sort_by_key(|c| (c.created.is_none(), c.created));
        let order: Vec<ClippingKey> = clippings.iter().map(Clipping::key).collect();

        report.published = clippings.len();
        if !board.extend(clippings).await {
            report.cancelled = true;
            report.published = 0;
        }
        (report, order)
    }

    async fn by_keyword(&self, query: &str, board: &ClippingBoard) -> Fetched {
        let filter = RecordFilter::ContentContains(query.to_string());
        let keep = |c: &Clipping| contains_ignore_case(&c.content, query);
        let scans = join_all(
            self.sources
                .iter()
                .map(|source| scan_source(source.as_ref(), &filter, board, &keep, true)),
        )
        .await;

        // The board holds pages in arrival order; lookups follow scan order.
        let mut report = AggregationReport::default();
        let mut order = Vec::new();
        for (source, scan) in self.sources.iter().zip(scans) {
            record_scan(&mut report, source.id(), &scan);
            report.published += scan.clippings.len();
            order.extend(scan.clippings.iter().map(Clipping::key));
        }
        (report, order)
    }

    async fn random(&self, board: &ClippingBoard) -> Fetched {
        let mut report = AggregationReport::default();
        if self.sources.is_empty() {
            warn!("No clipping sources configured");
            return (report, Vec::new());
        }

        let index = self.random.pick_index(self.sources.len());
        let Some(source) = self.sources.iter().nth(index) else {
            return (report, Vec::new());
        };

        let max_id = match self.max_id(source.as_ref(), board).await {
            Some(Ok(Some(max_id))) if max_id >= 1 => max_id,
            Some(Ok(_)) => {
                info!(source = %source.id(), "Source holds no clippings");
                return (report, Vec::new());
            }
            Some(Err(err)) => {
                warn!(source = %source.id(), error = %err, "Failed to find largest clipping id");
                report.failed_sources.push(source.id().clone());
                return (report, Vec::new());
            }
            None => {
                report.cancelled = true;
                return (report, Vec::new());
            }
        };

        let id = self.random.pick_in_range(1, max_id);
        debug!(source = %source.id(), id, max_id, "Picked random clipping");

        let mut order = Vec::new();
        match until_cancelled(board.token(), source.find_by_id(id)).await {
            Some(Ok(Some(raw))) => {
                let clipping = normalize_record(source.id(), raw);
                let key = clipping.key();
                if board.push(clipping).await {
                    report.published = 1;
                    order.push(key);
                } else {
                    report.cancelled = true;
                }
            }
            Some(Ok(None)) => info!(source = %source.id(), id, "No clipping with picked id"),
            Some(Err(err)) => {
                warn!(source = %source.id(), id, error = %err, "Failed to fetch random clipping");
                report.failed_sources.push(source.id().clone());
            }
            None => report.cancelled = true,
        }
        (report, order)
    }

    /// Largest id of `source`, cached for the aggregator's lifetime.
    /// `None` when the view was torn down first.
    async fn max_id(
        &self,
        source: &dyn ClippingSourcePort,
        board: &ClippingBoard,
    ) -> Option<Result<Option<i64>, FetchError>> {
        if let Some(max_id) = self.max_ids.lock().await.get(source.id()) {
            return Some(Ok(Some(*max_id)));
        }

        let result = until_cancelled(board.token(), source.max_id()).await?;
        if let Ok(Some(max_id)) = result {
            self.max_ids.lock().await.insert(source.id().clone(), max_id);
        }
        Some(result)
    }
}

fn record_scan(report: &mut AggregationReport, source: &SourceId, scan: &SourceScan) {
    report.cancelled |= scan.cancelled;
    if let Some(err) = &scan.error {
        warn!(source = %source, error = %err, "Clipping source failed, keeping partial results");
        report.failed_sources.push(source.clone());
    }
}

/// Follows `source`'s continuation cursors until exhausted, keeping the
/// normalized clippings accepted by `keep`.
///
/// With `publish_pages` each page's matches go to the board as soon as they
/// arrive. A failed page ends the scan with what was gathered so far.
async fn scan_source(
    source: &dyn ClippingSourcePort,
    filter: &RecordFilter,
    board: &ClippingBoard,
    keep: &(dyn Fn(&Clipping) -> bool + Sync),
    publish_pages: bool,
) -> SourceScan {
    let mut scan = SourceScan {
        clippings: Vec::new(),
        error: None,
        cancelled: false,
    };
    let mut cursor = None;
    let mut pages = 0usize;

    loop {
        let page = match until_cancelled(board.token(), source.select_page(filter, cursor.as_ref())).await {
            Some(Ok(page)) => page,
            Some(Err(err)) => {
                scan.error = Some(err);
                break;
            }
            None => {
                scan.cancelled = true;
                break;
            }
        };
        pages += 1;

        let matches: Vec<Clipping> = page
            .records
            .into_iter()
            .map(|raw| normalize_record(source.id(), raw))
            .filter(|clipping| keep(clipping))
            .collect();
        for clipping in matches.iter().filter(|c| c.page_label.is_none()) {
            debug!(source = %source.id(), id = %clipping.id, location = %clipping.location, "Unparsable location");
        }

        if publish_pages && !board.extend(matches.clone()).await {
            scan.cancelled = true;
            break;
        }
        scan.clippings.extend(matches);

        match page.next {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    debug!(source = %source.id(), pages, kept = scan.clippings.len(), "Source scanned");
    scan
}
