//! Remote list fetching with stale-result suppression.

mod coordinator;
mod intent;
mod reducer;
mod state;

pub use coordinator::{FetchCoordinator, FetchTicket};
pub use intent::FetchIntent;
pub use reducer::FetchReducer;
pub use state::FetchSnapshot;
