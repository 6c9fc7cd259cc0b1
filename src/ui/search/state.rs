//! State for the debounced search box.

use std::time::Duration;

use tokio::time::Instant;

use crate::ui::mvi::UiState;

/// Quiet period used when none is configured.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    /// What is currently in the box.
    pub draft: String,
    /// The last filter text known to be in the query.
    pub committed: String,
    /// When the pending draft will be committed, if a timer is running.
    pub deadline: Option<Instant>,
    /// Filter text the driver must write to the query next.
    pub outgoing: Option<String>,
    pub quiet_period: Duration,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(String::new(), DEFAULT_QUIET_PERIOD)
    }
}

impl UiState for SearchState {}

impl SearchState {
    pub fn new(committed: String, quiet_period: Duration) -> Self {
        Self {
            draft: committed.clone(),
            committed,
            deadline: None,
            outgoing: None,
            quiet_period,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Stops any timer and queues the trimmed draft for commit when it
    /// differs from what the query already holds.
    pub(super) fn commit_draft(mut self) -> Self {
        self.deadline = None;
        let text = self.draft.trim().to_string();
        if text != self.committed {
            self.committed = text.clone();
            self.outgoing = Some(text);
        }
        self
    }
}
