//! Queue with a fixed delay between consecutive items.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;

use crate::view::until_cancelled;

/// Starts item `i` of a batch `i × spacing` after the batch was scheduled.
///
/// Timing goes through `tokio::time`, so a paused test runtime drives the
/// schedule with virtual time.
#[derive(Debug, Clone, Copy)]
pub struct SpacedSchedule {
    spacing: Duration,
}

impl SpacedSchedule {
    pub fn new(spacing: Duration) -> Self {
        Self { spacing }
    }

    pub fn spacing(&self) -> Duration {
        self.spacing
    }

    pub fn offset(&self, index: usize) -> Duration {
        self.spacing * index as u32
    }

    /// Spawns one task per job. Job `i` is polled only once its slot has
    /// come; a cancelled token stops jobs that have not finished yet, and
    /// their handles resolve to `None`.
    pub fn spawn<F>(&self, jobs: Vec<F>, token: &CancellationToken) -> Vec<JoinHandle<Option<F::Output>>>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let start = Instant::now();
        jobs.into_iter()
            .enumerate()
            .map(|(index, job)| {
                let due = start + self.offset(index);
                let token = token.clone();
                tokio::spawn(async move {
                    until_cancelled(&token, sleep_until(due)).await?;
                    until_cancelled(&token, job).await
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_grow_linearly() {
        let schedule = SpacedSchedule::new(Duration::from_secs(10));
        assert_eq!(schedule.offset(0), Duration::ZERO);
        assert_eq!(schedule.offset(3), Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn test_jobs_start_at_their_slot() {
        let schedule = SpacedSchedule::new(Duration::from_secs(10));
        let start = Instant::now();
        let jobs: Vec<_> = (0..3)
            .map(|i| async move { (i, Instant::now() - start) })
            .collect();

        let handles = schedule.spawn(jobs, &CancellationToken::new());
        let mut fired = Vec::new();
        for handle in handles {
            fired.push(handle.await.unwrap().unwrap());
        }

        assert_eq!(
            fired,
            vec![
                (0, Duration::ZERO),
                (1, Duration::from_secs(10)),
                (2, Duration::from_secs(20)),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_jobs_not_yet_due() {
        let schedule = SpacedSchedule::new(Duration::from_secs(10));
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let jobs: Vec<_> = (0..3)
            .map(|i| {
                let tx = tx.clone();
                async move {
                    let _ = tx.send(i);
                }
            })
            .collect();
        let token = CancellationToken::new();

        let handles = schedule.spawn(jobs, &token);
        assert_eq!(rx.recv().await, Some(0));
        token.cancel();

        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap());
        }

        assert_eq!(results, vec![Some(()), None, None]);
        drop(tx);
        assert_eq!(rx.recv().await, None);
    }
}
