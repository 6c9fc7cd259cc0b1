use tokio::time::Instant;

use crate::ui::mvi::Intent;

#[derive(Debug, Clone, PartialEq)]
pub enum SearchIntent {
    /// The box content changed; (re)starts the quiet period from `now`.
    Edit { text: String, now: Instant },
    /// Timer check. Commits the draft if the deadline has passed.
    Elapsed { now: Instant },
    /// Enter / search button: commit right away.
    Submit,
    /// Clear button: empty the box and commit right away.
    Clear,
    /// The query's filter text changed outside the search box.
    External { committed: String },
}

impl Intent for SearchIntent {}
