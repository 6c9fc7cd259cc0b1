//! Record stores: the only way the console touches product data.
//!
//! [`MemoryStore`] is the in-process reference backend; [`HttpStore`]
//! talks to a server speaking the same contract over HTTP.

mod error;
mod http;
mod memory;

use async_trait::async_trait;

use crate::catalog::{ListParams, NewProduct, Product, ProductChanges, ResultPage};

pub use error::StoreError;
pub use http::HttpStore;
pub use memory::MemoryStore;

/// The external record-store contract.
///
/// `list` must follow [`run_query`](crate::catalog::run_query) exactly.
/// Writes are applied atomically by the store; callers hand in already
/// validated payloads.
#[async_trait]
pub trait RecordStore: Send + Sync + 'static {
    /// Returns one page of filtered, sorted records.
    async fn list(&self, params: &ListParams) -> Result<ResultPage, StoreError>;

    /// Inserts a new draft record and returns it with its assigned id.
    async fn create(&self, product: NewProduct) -> Result<Product, StoreError>;

    /// Applies `changes` to the record with `id`.
    ///
    /// Returns `StoreError::NotFound` if the id is unknown.
    async fn update(&self, id: &str, changes: ProductChanges) -> Result<Product, StoreError>;

    /// Removes the record with `id`.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}
