//! Async driver that connects the search reducer to the query.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{sleep_until, Instant};

use crate::ui::mvi::Reducer;
use crate::ui::query::{QueryHandle, QueryIntent, QueryState};

use super::intent::SearchIntent;
use super::reducer::SearchReducer;
use super::state::SearchState;

/// Turns keystrokes into at most one filter commit per quiet period.
///
/// The driver is polled cooperatively: callers feed input through
/// [`edit`](Self::edit), [`submit`](Self::submit) and
/// [`clear`](Self::clear), and await [`next_event`](Self::next_event) to
/// let the timer fire or to pick up location changes made elsewhere.
pub struct DebouncedInput {
    state: SearchState,
    query: QueryHandle,
    updates: watch::Receiver<QueryState>,
}

impl DebouncedInput {
    pub fn new(query: QueryHandle, quiet_period: Duration) -> Self {
        let updates = query.subscribe();
        let committed = query.read().filter;
        Self {
            state: SearchState::new(committed, quiet_period),
            query,
            updates,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn draft(&self) -> &str {
        &self.state.draft
    }

    pub fn edit(&mut self, text: impl Into<String>) {
        self.dispatch(SearchIntent::Edit {
            text: text.into(),
            now: Instant::now(),
        });
    }

    pub fn submit(&mut self) {
        self.dispatch(SearchIntent::Submit);
    }

    pub fn clear(&mut self) {
        self.dispatch(SearchIntent::Clear);
    }

    /// Applies any location change that arrived since the last call,
    /// without waiting.
    pub fn sync(&mut self) {
        if matches!(self.updates.has_changed(), Ok(true)) {
            self.apply_external();
        }
    }

    /// Waits for the pending timer or an external query change, whichever
    /// comes first, and handles it. Returns `false` once the query handle
    /// is gone.
    pub async fn next_event(&mut self) -> bool {
        let deadline = self.state.deadline;
        let external = tokio::select! {
            changed = self.updates.changed() => {
                if changed.is_err() {
                    return false;
                }
                true
            }
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => false,
        };

        if external {
            self.apply_external();
        } else {
            self.dispatch(SearchIntent::Elapsed { now: Instant::now() });
        }
        true
    }

    fn apply_external(&mut self) {
        let committed = self.updates.borrow_and_update().filter.clone();
        self.dispatch(SearchIntent::External { committed });
    }

    fn dispatch(&mut self, intent: SearchIntent) {
        let state = std::mem::take(&mut self.state);
        self.state = SearchReducer::reduce(state, intent);

        if let Some(text) = self.state.outgoing.take() {
            tracing::debug!(filter = %text, "Committing search filter");
            self.query.dispatch(QueryIntent::SetFilter(text));
        }
    }
}
