//! The single owner of the query location.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::ui::mvi::Reducer;

use super::history::LocationHistory;
use super::intent::QueryIntent;
use super::location::Location;
use super::reducer::QueryReducer;
use super::state::QueryState;

struct Shared {
    history: LocationHistory,
    revision: u64,
}

struct Inner {
    shared: Mutex<Shared>,
    changes: watch::Sender<QueryState>,
}

/// Cloneable handle to the list query.
///
/// The state is always derived from the current location, and every write
/// goes through [`QueryHandle::update`], which rewrites the location in one
/// step under a lock. Subscribers receive the derived [`QueryState`] after
/// each change.
#[derive(Clone)]
pub struct QueryHandle {
    inner: Arc<Inner>,
}

impl QueryHandle {
    pub fn new(initial: Location) -> Self {
        let state = QueryState::from_location(&initial);
        let (changes, _) = watch::channel(state);
        Self {
            inner: Arc::new(Inner {
                shared: Mutex::new(Shared {
                    history: LocationHistory::new(initial),
                    revision: 0,
                }),
                changes,
            }),
        }
    }

    /// Parses the current location.
    pub fn read(&self) -> QueryState {
        QueryState::from_location(self.inner.shared.lock().history.current())
    }

    pub fn location(&self) -> Location {
        self.inner.shared.lock().history.current().clone()
    }

    /// Number of location writes so far (replacements and navigation).
    pub fn revision(&self) -> u64 {
        self.inner.shared.lock().revision
    }

    pub fn subscribe(&self) -> watch::Receiver<QueryState> {
        self.inner.changes.subscribe()
    }

    /// Applies `mutate` to the current state and writes the result back,
    /// replacing the current history entry. No write happens when the
    /// state is unchanged.
    ///
    /// A change of filter or sort always lands on page 1, whatever page
    /// `mutate` picked. `mutate` runs without the lock held, so it may read
    /// the handle; it is re-run if another write lands in the meantime.
    pub fn update(&self, mutate: impl Fn(QueryState) -> QueryState) -> QueryState {
        loop {
            let (current, revision) = {
                let shared = self.inner.shared.lock();
                (
                    QueryState::from_location(shared.history.current()),
                    shared.revision,
                )
            };
            let next = normalize(&current, mutate(current.clone()));
            if next == current {
                return current;
            }

            let mut shared = self.inner.shared.lock();
            if shared.revision != revision {
                tracing::trace!("Query location changed during update, retrying");
                continue;
            }

            let mut location = shared.history.current().clone();
            next.write_to(&mut location);
            tracing::debug!(location = %location, "Query location replaced");
            shared.history.replace(location);
            shared.revision += 1;

            let state = QueryState::from_location(shared.history.current());
            self.publish(state.clone());
            return state;
        }
    }

    pub fn dispatch(&self, intent: QueryIntent) -> QueryState {
        self.update(|state| QueryReducer::reduce(state, intent.clone()))
    }

    /// External edit of the location (address bar, shared link): pushes a
    /// new history entry.
    pub fn navigate(&self, raw: &str) -> QueryState {
        let mut shared = self.inner.shared.lock();
        let location = Location::parse(raw);
        tracing::debug!(location = %location, "Query location pushed");
        shared.history.push(location);
        shared.revision += 1;

        let state = QueryState::from_location(shared.history.current());
        self.publish(state.clone());
        state
    }

    /// Back navigation; `None` when already at the oldest entry.
    pub fn back(&self) -> Option<QueryState> {
        self.step(LocationHistory::back)
    }

    /// Forward navigation; `None` when already at the newest entry.
    pub fn forward(&self) -> Option<QueryState> {
        self.step(LocationHistory::forward)
    }

    fn step(&self, move_cursor: fn(&mut LocationHistory) -> bool) -> Option<QueryState> {
        let mut shared = self.inner.shared.lock();
        if !move_cursor(&mut shared.history) {
            return None;
        }
        shared.revision += 1;

        let state = QueryState::from_location(shared.history.current());
        self.publish(state.clone());
        Some(state)
    }

    fn publish(&self, state: QueryState) {
        self.inner.changes.send_if_modified(|current| {
            if *current == state {
                return false;
            }
            *current = state;
            true
        });
    }
}

/// Canonical form of `next` as it would read back from the location, with
/// the page reset when the filter or sort moved away from `current`.
fn normalize(current: &QueryState, next: QueryState) -> QueryState {
    let filter = next.filter.trim().to_string();
    let page = if filter != current.filter || next.sort != current.sort {
        1
    } else {
        next.page.max(1)
    };
    QueryState {
        filter,
        page,
        sort: next.sort,
    }
}
