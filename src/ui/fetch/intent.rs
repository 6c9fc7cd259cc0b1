use crate::catalog::{ListParams, ResultPage};
use crate::ui::mvi::Intent;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchIntent {
    /// A fetch for `key` was issued with a fresh, larger generation.
    Started { generation: u64, key: ListParams },
    Succeeded { generation: u64, page: ResultPage },
    Failed { generation: u64, message: String },
}

impl Intent for FetchIntent {}
