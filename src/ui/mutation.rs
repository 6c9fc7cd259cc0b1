//! Create, update and delete with validation up front and a refresh after.

use std::sync::Arc;

use crate::catalog::{Product, ProductInput, ProductPatch};
use crate::store::{RecordStore, StoreError};
use crate::ui::fetch::FetchCoordinator;
use crate::ui::query::QueryHandle;

/// Runs writes against the store on behalf of the console.
///
/// Input is validated before anything leaves the process; a rejected form
/// surfaces as [`StoreError::Invalid`] and the store is never called.
/// After a successful write the list is re-fetched for whatever the query
/// is at that moment, not what it was when the write started. Failed
/// writes leave the list alone.
#[derive(Clone)]
pub struct MutationCoordinator {
    store: Arc<dyn RecordStore>,
    query: QueryHandle,
    fetch: Arc<FetchCoordinator>,
}

impl MutationCoordinator {
    pub fn new(store: Arc<dyn RecordStore>, query: QueryHandle, fetch: Arc<FetchCoordinator>) -> Self {
        Self { store, query, fetch }
    }

    pub async fn create(&self, input: &ProductInput) -> Result<Product, StoreError> {
        let product = input.validate()?;
        let created = self
            .store
            .create(product)
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "Create failed"))?;

        tracing::info!(id = %created.id, name = %created.name, "Product created");
        self.refresh();
        Ok(created)
    }

    pub async fn update(&self, id: &str, patch: &ProductPatch) -> Result<Product, StoreError> {
        let changes = patch.validate()?;
        let updated = self
            .store
            .update(id, changes)
            .await
            .inspect_err(|err| tracing::warn!(id = %id, error = %err, "Update failed"))?;

        tracing::info!(id = %updated.id, status = %updated.status, "Product updated");
        self.refresh();
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.store
            .delete(id)
            .await
            .inspect_err(|err| tracing::warn!(id = %id, error = %err, "Delete failed"))?;

        tracing::info!(id = %id, "Product deleted");
        self.refresh();
        Ok(())
    }

    fn refresh(&self) {
        let ticket = self.fetch.reload(&self.query.read());
        tracing::debug!(generation = ticket.generation(), "List refresh after write");
    }
}
