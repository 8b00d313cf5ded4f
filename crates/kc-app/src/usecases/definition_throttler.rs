//! Rate-limited definition lookups for single-word clippings.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn, Instrument};

use kc_core::clipping::ClippingKey;
use kc_core::ports::DefinitionPort;

use super::spaced_schedule::SpacedSchedule;
use crate::view::ClippingBoard;

/// One pending definition request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionLookupTask {
    pub owner: ClippingKey,
    pub word: String,
    /// Delay from the scheduling call until the request fires.
    pub offset: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Resolved(ClippingKey),
    /// The provider failed or had nothing; the clipping keeps no definition.
    Unavailable(ClippingKey),
    /// The view was torn down before the result could be applied.
    Cancelled(ClippingKey),
}

/// Handle to one batch of scheduled lookups.
#[derive(Debug, Default)]
pub struct ScheduledLookups {
    tasks: Vec<DefinitionLookupTask>,
    handles: Vec<JoinHandle<Option<LookupOutcome>>>,
}

impl ScheduledLookups {
    pub fn tasks(&self) -> &[DefinitionLookupTask] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Waits for every lookup of the batch, in task order.
    pub async fn join(self) -> Vec<LookupOutcome> {
        let mut outcomes = Vec::with_capacity(self.tasks.len());
        for (task, handle) in self.tasks.into_iter().zip(self.handles) {
            let outcome = match handle.await {
                Ok(Some(outcome)) => outcome,
                Ok(None) => LookupOutcome::Cancelled(task.owner),
                Err(err) => {
                    warn!(word = %task.word, error = %err, "Definition lookup task aborted");
                    LookupOutcome::Cancelled(task.owner)
                }
            };
            outcomes.push(outcome);
        }
        outcomes
    }
}

/// Spaces definition requests so the provider's rate limit is never hit,
/// merging each result into its own clipping as soon as it arrives.
pub struct DefinitionThrottler {
    definitions: Arc<dyn DefinitionPort>,
    schedule: SpacedSchedule,
}

impl DefinitionThrottler {
    /// Observed provider tolerance: one request every ten seconds.
    pub const DEFAULT_SPACING: Duration = Duration::from_secs(10);

    pub fn new(definitions: Arc<dyn DefinitionPort>, spacing: Duration) -> Self {
        Self {
            definitions,
            schedule: SpacedSchedule::new(spacing),
        }
    }

    pub fn with_default_spacing(definitions: Arc<dyn DefinitionPort>) -> Self {
        Self::new(definitions, Self::DEFAULT_SPACING)
    }

    /// Schedules one lookup per eligible clipping of `order` not yet
    /// attempted, numbered in `order`. Lookup `i` fires `i × spacing` from now.
    ///
    /// Lookups are tied to the board's view: once it is torn down, pending
    /// lookups never fire and in-flight ones are dropped without touching
    /// the board.
    pub async fn schedule(&self, board: &ClippingBoard, order: &[ClippingKey]) -> ScheduledLookups {
        let claimed = board.claim_unattempted(order).await;
        if claimed.is_empty() {
            return ScheduledLookups::default();
        }

        let tasks: Vec<DefinitionLookupTask> = claimed
            .into_iter()
            .enumerate()
            .map(|(index, (owner, word))| DefinitionLookupTask {
                owner,
                word,
                offset: self.schedule.offset(index),
            })
            .collect();
        info!(
            count = tasks.len(),
            spacing_ms = self.schedule.spacing().as_millis() as u64,
            "Scheduling definition lookups"
        );

        let jobs: Vec<_> = tasks
            .iter()
            .map(|task| {
                let span = info_span!("usecase.definition_throttler.lookup", word = %task.word);
                lookup(
                    Arc::clone(&self.definitions),
                    board.clone(),
                    task.owner.clone(),
                    task.word.clone(),
                )
                .instrument(span)
            })
            .collect();
        let handles = self.schedule.spawn(jobs, board.token());

        ScheduledLookups { tasks, handles }
    }
}

async fn lookup(
    definitions: Arc<dyn DefinitionPort>,
    board: ClippingBoard,
    owner: ClippingKey,
    word: String,
) -> LookupOutcome {
    let definition = match definitions.top_definition(&word).await {
        Ok(definition) => Some(definition),
        Err(err) => {
            warn!(error = %err, "Definition unavailable");
            None
        }
    };
    let resolved = definition.is_some();

    if !board.settle_definition(&owner, definition).await {
        debug!("View gone before definition arrived, dropping result");
        return LookupOutcome::Cancelled(owner);
    }

    if resolved {
        debug!("Definition merged");
        LookupOutcome::Resolved(owner)
    } else {
        LookupOutcome::Unavailable(owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use kc_core::clipping::{normalize_record, Definition, LookupStatus, RawClippingRecord};
    use kc_core::ports::FetchError;
    use kc_core::SourceId;
    use std::sync::Mutex;
    use tokio::time::Instant;

    use crate::view::ClippingView;

    /// Records when each word was requested and answers from a fixed table.
    struct RecordingDefinitions {
        started: Instant,
        calls: Mutex<Vec<(String, Duration)>>,
    }

    impl RecordingDefinitions {
        fn new() -> Self {
            Self {
                started: Instant::now(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(String, Duration)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DefinitionPort for RecordingDefinitions {
        async fn top_definition(&self, word: &str) -> Result<Definition, FetchError> {
            self.calls
                .lock()
                .unwrap()
                .push((word.to_string(), Instant::now() - self.started));
            match word {
                "missing" => Err(FetchError::MalformedResponse("no text".to_string())),
                "offline" => Err(FetchError::Failure("connection reset".to_string())),
                _ => Ok(Definition {
                    text: format!("meaning of {word}"),
                    attribution: "from a dictionary".to_string(),
                }),
            }
        }
    }

    fn clipping(id: i64, content: &str) -> kc_core::Clipping {
        normalize_record(
            &SourceId::from("clippings"),
            RawClippingRecord {
                id,
                title: "Book".to_string(),
                author: "Author".to_string(),
                content: content.to_string(),
                created: "01/01/2020 1:00 PM".to_string(),
                location: "100".to_string(),
            },
        )
    }

    async fn board_order(board: &ClippingBoard) -> Vec<ClippingKey> {
        board.snapshot().await.iter().map(|c| c.key()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_lookups_fire_ten_seconds_apart() {
        let definitions = Arc::new(RecordingDefinitions::new());
        let throttler = DefinitionThrottler::with_default_spacing(definitions.clone());
        let view = ClippingView::new();
        view.items
            .extend(vec![
                clipping(1, "alpha"),
                clipping(2, "not a single word"),
                clipping(3, "beta"),
                clipping(4, "gamma"),
            ])
            .await;

        let order = board_order(&view.items).await;
        let lookups = throttler.schedule(&view.items, &order).await;
        let offsets: Vec<Duration> = lookups.tasks().iter().map(|t| t.offset).collect();
        assert_eq!(
            offsets,
            vec![Duration::ZERO, Duration::from_secs(10), Duration::from_secs(20)]
        );

        let outcomes = lookups.join().await;
        assert!(outcomes.iter().all(|o| matches!(o, LookupOutcome::Resolved(_))));
        assert_eq!(
            definitions.calls(),
            vec![
                ("alpha".to_string(), Duration::ZERO),
                ("beta".to_string(), Duration::from_secs(10)),
                ("gamma".to_string(), Duration::from_secs(20)),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_result_touches_only_its_clipping() {
        let definitions = Arc::new(RecordingDefinitions::new());
        let throttler = DefinitionThrottler::with_default_spacing(definitions);
        let view = ClippingView::new();
        view.items
            .extend(vec![clipping(1, "alpha"), clipping(2, "two words"), clipping(3, "beta")])
            .await;
        let order = board_order(&view.items).await;
        let lookups = throttler.schedule(&view.items, &order).await;
        let after_scheduling = view.items.snapshot().await;

        let mut rx = view.items.subscribe();
        rx.changed().await.unwrap();
        let after_first = view.items.snapshot().await;

        assert_eq!(after_first[0].lookup, LookupStatus::Resolved);
        assert_eq!(after_first[1], after_scheduling[1]);
        assert_eq!(after_first[2], after_scheduling[2]);

        lookups.join().await;
        let done = view.items.snapshot().await;
        assert_eq!(done[0], after_first[0]);
        assert_eq!(done[1], after_scheduling[1]);
        assert_eq!(
            done[2].definition.as_ref().map(|d| d.text.as_str()),
            Some("meaning of beta")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_leave_definition_absent_without_blocking_others() {
        let definitions = Arc::new(RecordingDefinitions::new());
        let throttler = DefinitionThrottler::new(definitions.clone(), Duration::from_secs(1));
        let view = ClippingView::new();
        view.items
            .extend(vec![clipping(1, "missing"), clipping(2, "offline"), clipping(3, "gamma")])
            .await;

        let order = board_order(&view.items).await;
        let outcomes = throttler.schedule(&view.items, &order).await.join().await;

        assert!(matches!(outcomes[0], LookupOutcome::Unavailable(_)));
        assert!(matches!(outcomes[1], LookupOutcome::Unavailable(_)));
        assert!(matches!(outcomes[2], LookupOutcome::Resolved(_)));
        let clippings = view.items.snapshot().await;
        assert_eq!(clippings[0].lookup, LookupStatus::Unavailable);
        assert!(clippings[0].definition.is_none());
        assert!(clippings[2].definition.is_some());

        // Attempted clippings are never scheduled again.
        let order = board_order(&view.items).await;
        assert!(throttler.schedule(&view.items, &order).await.is_empty());
        assert_eq!(definitions.calls().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_suppresses_pending_lookups() {
        let definitions = Arc::new(RecordingDefinitions::new());
        let throttler = DefinitionThrottler::with_default_spacing(definitions.clone());
        let view = ClippingView::new();
        view.items
            .extend(vec![clipping(1, "alpha"), clipping(2, "beta"), clipping(3, "gamma")])
            .await;
        let order = board_order(&view.items).await;
        let lookups = throttler.schedule(&view.items, &order).await;

        let mut rx = view.items.subscribe();
        rx.changed().await.unwrap();
        let before_teardown = view.items.snapshot().await;
        view.teardown();

        let outcomes = lookups.join().await;
        assert!(matches!(outcomes[0], LookupOutcome::Resolved(_)));
        assert!(matches!(outcomes[1], LookupOutcome::Cancelled(_)));
        assert!(matches!(outcomes[2], LookupOutcome::Cancelled(_)));
        assert_eq!(definitions.calls().len(), 1);
        assert_eq!(view.items.snapshot().await, before_teardown);
    }
}
