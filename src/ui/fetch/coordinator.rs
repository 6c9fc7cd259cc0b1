//! Issues list fetches and publishes only the latest one's outcome.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::catalog::ListParams;
use crate::store::RecordStore;
use crate::ui::mvi::Reducer;
use crate::ui::query::QueryState;

use super::intent::FetchIntent;
use super::reducer::FetchReducer;
use super::state::FetchSnapshot;

/// Handle to one issued fetch.
///
/// Dropping it does not cancel anything; it only lets callers wait for the
/// request to resolve.
pub struct FetchTicket {
    generation: u64,
    task: JoinHandle<()>,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Waits until the store call has resolved and its outcome has been
    /// applied or discarded.
    pub async fn finished(self) {
        if let Err(err) = self.task.await {
            tracing::warn!(generation = self.generation, error = %err, "Fetch task failed");
        }
    }
}

/// Keeps the list snapshot in step with the query.
///
/// Every fetch gets a generation number one higher than the last. When a
/// fetch resolves, its outcome is applied only if its generation is still
/// the latest; anything older is dropped without touching `loading` or
/// `error`. Requests are never aborted, only ignored.
///
/// In-flight fetches hold a weak reference to the snapshot, so once the
/// coordinator is dropped their results go nowhere.
pub struct FetchCoordinator {
    store: Arc<dyn RecordStore>,
    page_size: usize,
    snapshot: Arc<watch::Sender<FetchSnapshot>>,
}

impl FetchCoordinator {
    pub fn new(store: Arc<dyn RecordStore>, page_size: usize) -> Self {
        let (snapshot, _) = watch::channel(FetchSnapshot::default());
        Self {
            store,
            page_size,
            snapshot: Arc::new(snapshot),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn snapshot(&self) -> FetchSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchSnapshot> {
        self.snapshot.subscribe()
    }

    /// Starts a fetch if `query` maps to a different key than the last
    /// fetch issued.
    pub fn observe(&self, query: &QueryState) -> Option<FetchTicket> {
        let key = query.to_params(self.page_size);
        if self.snapshot.borrow().key.as_ref() == Some(&key) {
            return None;
        }
        Some(self.start(key))
    }

    /// Starts a fetch for `query` even if its key has not changed.
    pub fn reload(&self, query: &QueryState) -> FetchTicket {
        self.start(query.to_params(self.page_size))
    }

    /// Re-issues the last key, if any fetch has been made.
    pub fn refresh(&self) -> Option<FetchTicket> {
        let key = self.snapshot.borrow().key.clone()?;
        Some(self.start(key))
    }

    fn start(&self, key: ListParams) -> FetchTicket {
        let mut generation = 0;
        self.snapshot.send_modify(|snapshot| {
            generation = snapshot.generation + 1;
            let state = std::mem::take(snapshot);
            *snapshot = FetchReducer::reduce(
                state,
                FetchIntent::Started {
                    generation,
                    key: key.clone(),
                },
            );
        });
        tracing::debug!(
            generation,
            filter = %key.filter,
            page = key.page,
            page_size = key.page_size,
            sort = ?key.sort,
            "Fetch started"
        );

        let store = self.store.clone();
        let target = Arc::downgrade(&self.snapshot);
        let task = tokio::spawn(async move {
            let outcome = store.list(&key).await;

            let Some(snapshot) = target.upgrade() else {
                tracing::debug!(generation, "Fetch resolved after teardown, discarding");
                return;
            };

            let intent = match outcome {
                Ok(page) => FetchIntent::Succeeded { generation, page },
                Err(err) => FetchIntent::Failed {
                    generation,
                    message: err.to_string(),
                },
            };

            snapshot.send_if_modified(|current| {
                if !current.is_current(generation) {
                    tracing::debug!(
                        generation,
                        latest = current.generation,
                        "Discarding superseded fetch"
                    );
                    return false;
                }
                let state = std::mem::take(current);
                *current = FetchReducer::reduce(state, intent);
                match &current.error {
                    Some(error) => tracing::warn!(generation, error = %error, "Fetch failed"),
                    None => tracing::debug!(generation, total = current.total, "Fetch published"),
                }
                true
            });
        });

        FetchTicket { generation, task }
    }
}
