//! The list console: query, search box, fetches and writes wired together.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::config::ConsoleConfig;
use crate::store::RecordStore;
use crate::ui::fetch::{FetchCoordinator, FetchSnapshot};
use crate::ui::mutation::MutationCoordinator;
use crate::ui::query::{Location, QueryHandle, QueryIntent, QueryState};
use crate::ui::search::DebouncedInput;

enum ConsoleEvent {
    Search(bool),
    Query,
    Snapshot,
    Closed,
}

/// One mounted product list.
///
/// The console fetches as soon as it is built and again whenever the query
/// key changes. When a fetch comes back with a different page than the one
/// requested (the backend clamped it), the location is corrected to the
/// served page. Dropping the console discards anything still in flight.
pub struct ListConsole {
    query: QueryHandle,
    search: DebouncedInput,
    fetch: Arc<FetchCoordinator>,
    mutations: MutationCoordinator,
    query_updates: watch::Receiver<QueryState>,
    snapshots: watch::Receiver<FetchSnapshot>,
}

impl ListConsole {
    pub fn new(store: Arc<dyn RecordStore>, location: Location, settings: &ConsoleConfig) -> Self {
        let query = QueryHandle::new(location);
        let fetch = Arc::new(FetchCoordinator::new(store.clone(), settings.page_size));
        let mutations = MutationCoordinator::new(store, query.clone(), fetch.clone());
        let search = DebouncedInput::new(query.clone(), Duration::from_millis(settings.debounce_ms));
        let query_updates = query.subscribe();
        let snapshots = fetch.subscribe();

        fetch.observe(&query.read());

        Self {
            query,
            search,
            fetch,
            mutations,
            query_updates,
            snapshots,
        }
    }

    pub fn query(&self) -> &QueryHandle {
        &self.query
    }

    pub fn search(&mut self) -> &mut DebouncedInput {
        &mut self.search
    }

    pub fn mutations(&self) -> &MutationCoordinator {
        &self.mutations
    }

    pub fn fetch(&self) -> &FetchCoordinator {
        &self.fetch
    }

    pub fn snapshot(&self) -> FetchSnapshot {
        self.fetch.snapshot()
    }

    /// Handles changes that are already pending, without waiting.
    pub fn sync(&mut self) {
        self.search.sync();
        if matches!(self.query_updates.has_changed(), Ok(true)) {
            let state = self.query_updates.borrow_and_update().clone();
            self.fetch.observe(&state);
        }
    }

    /// Waits for the next timer, query change or fetch outcome and reacts
    /// to it. Returns `false` once there is nothing left to wait on.
    pub async fn step(&mut self) -> bool {
        let event = tokio::select! {
            alive = self.search.next_event() => ConsoleEvent::Search(alive),
            changed = self.query_updates.changed() => match changed {
                Ok(()) => ConsoleEvent::Query,
                Err(_) => ConsoleEvent::Closed,
            },
            changed = self.snapshots.changed() => match changed {
                Ok(()) => ConsoleEvent::Snapshot,
                Err(_) => ConsoleEvent::Closed,
            },
        };

        match event {
            ConsoleEvent::Search(alive) => alive,
            ConsoleEvent::Query => {
                let state = self.query_updates.borrow_and_update().clone();
                self.fetch.observe(&state);
                true
            }
            ConsoleEvent::Snapshot => {
                let snapshot = self.snapshots.borrow_and_update().clone();
                self.correct_drift(&snapshot);
                true
            }
            ConsoleEvent::Closed => false,
        }
    }

    /// Drives the console until no search commit is pending and the latest
    /// fetch has resolved, then returns the snapshot.
    pub async fn settle(&mut self) -> FetchSnapshot {
        loop {
            self.sync();
            let snapshot = self.fetch.snapshot();
            if !snapshot.loading && !self.search.state().is_pending() {
                if self.correct_drift(&snapshot) {
                    continue;
                }
                return snapshot;
            }
            if !self.step().await {
                return self.fetch.snapshot();
            }
        }
    }

    /// Rewrites the page in the location when the backend served a
    /// different one. Returns whether a correction was made.
    fn correct_drift(&self, snapshot: &FetchSnapshot) -> bool {
        if !snapshot.is_settled() {
            return false;
        }
        let (Some(served), Some(key)) = (snapshot.served_page, snapshot.key.as_ref()) else {
            return false;
        };
        if served == key.page {
            return false;
        }
        if self.query.read().to_params(self.fetch.page_size()) != *key {
            return false;
        }

        tracing::info!(requested = key.page, served, "Correcting page to the one served");
        self.query.dispatch(QueryIntent::SetPage(served));
        true
    }
}
