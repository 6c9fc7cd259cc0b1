use crate::catalog::SortSpec;
use crate::ui::mvi::Intent;

#[derive(Debug, Clone, PartialEq)]
pub enum QueryIntent {
    /// Commit new filter text. Trimmed; a real change resets the page.
    SetFilter(String),
    /// Jump to a page (values below 1 become 1).
    SetPage(usize),
    /// Set or clear (`None`) the sort. A real change resets the page.
    SetSort(Option<SortSpec>),
    /// Back to the default query.
    Reset,
}

impl Intent for QueryIntent {}
