//! Snapshot of the list as seen by the rendering layer.

use crate::catalog::{ListParams, Product, ResultPage};
use crate::ui::mvi::UiState;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FetchSnapshot {
    pub items: Vec<Product>,
    pub total: usize,
    /// Page the backend actually served; `None` until a fetch succeeds.
    pub served_page: Option<usize>,
    pub total_pages: usize,
    pub loading: bool,
    pub error: Option<String>,
    /// Generation of the most recently issued fetch. Only its outcome may
    /// change the snapshot.
    pub generation: u64,
    /// Query key of the most recently issued fetch.
    pub key: Option<ListParams>,
}

impl UiState for FetchSnapshot {}

impl FetchSnapshot {
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// True when the latest fetch has resolved without error.
    pub fn is_settled(&self) -> bool {
        !self.loading && self.error.is_none() && self.served_page.is_some()
    }

    pub(super) fn publish(self, page: ResultPage) -> Self {
        Self {
            items: page.items,
            total: page.total,
            served_page: Some(page.page),
            total_pages: page.total_pages,
            loading: false,
            error: None,
            ..self
        }
    }
}
