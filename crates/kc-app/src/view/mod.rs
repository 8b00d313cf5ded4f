//! View scopes and the live collections they own.
//!
//! A view scope stands for one mounted page: it owns a cancellation token,
//! and every asynchronous operation started on the page's behalf is raced
//! against it. Collections refuse mutations once the token has fired.

mod clipping_board;
mod collection;
mod scope;

pub use clipping_board::ClippingBoard;
pub use collection::LiveCollection;
pub use scope::{until_cancelled, ViewScope};

use kc_core::{BookSummary, Clipping};

/// A view scope together with the collection it renders.
pub struct LiveView<T> {
    pub scope: ViewScope,
    pub items: LiveCollection<T>,
}

impl<T: Clone + Send + 'static> LiveView<T> {
    pub fn new() -> Self {
        let scope = ViewScope::new();
        let items = LiveCollection::new(scope.token());
        Self { scope, items }
    }

    /// Cancels every pending operation of this view.
    pub fn teardown(&self) {
        self.scope.teardown();
    }
}

impl<T: Clone + Send + 'static> Default for LiveView<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub type ClippingView = LiveView<Clipping>;
pub type CatalogView = LiveView<BookSummary>;
