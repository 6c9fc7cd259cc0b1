//! Record store whose list calls are answered by the test.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use catalog_console::catalog::{
    run_query, ListParams, NewProduct, Product, ProductChanges, ResultPage,
};
use catalog_console::store::{MemoryStore, RecordStore, StoreError};
use tokio::sync::{mpsc, oneshot, Mutex};

/// A list call waiting for the test to answer it.
pub struct PendingList {
    pub params: ListParams,
    responder: oneshot::Sender<Result<ResultPage, StoreError>>,
}

impl PendingList {
    pub fn respond(self, result: Result<ResultPage, StoreError>) {
        let _ = self.responder.send(result);
    }

    /// Answers with the reference query over `records`.
    pub fn respond_with(self, records: &[Product]) {
        let page = run_query(records, &self.params);
        self.respond(Ok(page));
    }

    pub fn fail(self, message: &str) {
        self.respond(Err(StoreError::Transport(message.to_string())));
    }
}

/// Writes go straight to an inner [`MemoryStore`]; list calls are parked
/// until the test picks them up with [`ScriptedStore::next_list`].
pub struct ScriptedStore {
    pub records: MemoryStore,
    calls_tx: mpsc::UnboundedSender<PendingList>,
    calls_rx: Mutex<mpsc::UnboundedReceiver<PendingList>>,
    list_calls: AtomicUsize,
    write_calls: AtomicUsize,
    write_gate: Mutex<Option<oneshot::Receiver<()>>>,
    write_failure: Mutex<Option<StoreError>>,
}

impl ScriptedStore {
    pub fn new(records: Vec<Product>) -> Self {
        let (calls_tx, calls_rx) = mpsc::unbounded_channel();
        Self {
            records: MemoryStore::with_records(records),
            calls_tx,
            calls_rx: Mutex::new(calls_rx),
            list_calls: AtomicUsize::new(0),
            write_calls: AtomicUsize::new(0),
            write_gate: Mutex::new(None),
            write_failure: Mutex::new(None),
        }
    }

    /// Waits for the next list call the store receives.
    pub async fn next_list(&self) -> PendingList {
        self.calls_rx
            .lock()
            .await
            .recv()
            .await
            .expect("store dropped")
    }

    /// Returns a list call that has already arrived, if any.
    pub async fn try_next_list(&self) -> Option<PendingList> {
        self.calls_rx.lock().await.try_recv().ok()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    /// Holds the next write until the returned sender fires or is dropped.
    pub async fn hold_next_write(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.write_gate.lock().await = Some(rx);
        tx
    }

    /// Makes the next write fail with `err` without touching the records.
    pub async fn fail_next_write(&self, err: StoreError) {
        *self.write_failure.lock().await = Some(err);
    }

    async fn before_write(&self) -> Result<(), StoreError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.write_gate.lock().await.take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        match self.write_failure.lock().await.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RecordStore for ScriptedStore {
    async fn list(&self, params: &ListParams) -> Result<ResultPage, StoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let (responder, response) = oneshot::channel();
        let pending = PendingList {
            params: params.clone(),
            responder,
        };
        if self.calls_tx.send(pending).is_err() {
            return Err(StoreError::Transport("scripted store closed".into()));
        }
        response
            .await
            .unwrap_or_else(|_| Err(StoreError::Transport("list call abandoned".into())))
    }

    async fn create(&self, product: NewProduct) -> Result<Product, StoreError> {
        self.before_write().await?;
        self.records.create(product).await
    }

    async fn update(&self, id: &str, changes: ProductChanges) -> Result<Product, StoreError> {
        self.before_write().await?;
        self.records.update(id, changes).await
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.before_write().await?;
        self.records.delete(id).await
    }
}
