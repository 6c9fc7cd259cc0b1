//! In-memory reference store.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::catalog::{run_query, ListParams, NewProduct, Product, ProductChanges, ResultPage};

use super::{RecordStore, StoreError};

/// Thread-safe, storage-ordered product list.
///
/// New records go to the front, mirroring how the console shows the most
/// recently created products first when no sort is applied.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<Product>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Product>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    /// Copy of every record in storage order.
    pub fn records(&self) -> Vec<Product> {
        self.records.read().clone()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list(&self, params: &ListParams) -> Result<ResultPage, StoreError> {
        let records = self.records.read();
        Ok(run_query(&records, params))
    }

    async fn create(&self, product: NewProduct) -> Result<Product, StoreError> {
        let created = Product::new(Uuid::new_v4().simple().to_string(), product);
        self.records.write().insert(0, created.clone());
        tracing::debug!(id = %created.id, name = %created.name, "Product created");
        Ok(created)
    }

    async fn update(&self, id: &str, changes: ProductChanges) -> Result<Product, StoreError> {
        let mut records = self.records.write();
        let product = records
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found(id))?;
        product.apply(changes, Utc::now());
        tracing::debug!(id = %product.id, status = %product.status, "Product updated");
        Ok(product.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut records = self.records.write();
        let index = records
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| StoreError::not_found(id))?;
        records.remove(index);
        tracing::debug!(id = %id, "Product deleted");
        Ok(())
    }
}
