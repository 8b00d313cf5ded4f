use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tokio_util::sync::CancellationToken;

/// Shared, observable list owned by one view.
///
/// Every mutation checks the owning view's token under the lock, so once the
/// view has been torn down nothing can change the list any more. Each
/// applied mutation bumps a revision counter that renderers can watch.
pub struct LiveCollection<T> {
    items: Arc<Mutex<Vec<T>>>,
    revision: Arc<watch::Sender<u64>>,
    token: CancellationToken,
}

impl<T> Clone for LiveCollection<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            revision: Arc::clone(&self.revision),
            token: self.token.clone(),
        }
    }
}

impl<T: Clone + Send + 'static> LiveCollection<T> {
    pub fn new(token: CancellationToken) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            items: Arc::new(Mutex::new(Vec::new())),
            revision: Arc::new(revision),
            token,
        }
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Applies `f` unless the view is gone. Returns `None` when suppressed,
    /// otherwise whatever `f` returned.
    pub async fn mutate<R>(&self, f: impl FnOnce(&mut Vec<T>) -> R) -> Option<R> {
        let mut items = self.items.lock().await;
        if self.token.is_cancelled() {
            return None;
        }
        let out = f(&mut items);
        self.revision.send_modify(|rev| *rev += 1);
        Some(out)
    }

    /// Appends `new_items`. Returns `false` when the view is gone.
    pub async fn extend(&self, new_items: impl IntoIterator<Item = T>) -> bool {
        let new_items: Vec<T> = new_items.into_iter().collect();
        if new_items.is_empty() {
            return !self.is_closed();
        }
        self.mutate(|items| items.extend(new_items)).await.is_some()
    }

    pub async fn push(&self, item: T) -> bool {
        self.mutate(|items| items.push(item)).await.is_some()
    }

    pub async fn snapshot(&self) -> Vec<T> {
        self.items.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.items.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.lock().await.is_empty()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}
