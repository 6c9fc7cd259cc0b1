//! List query state synchronised with a shareable location.

mod handle;
mod history;
mod intent;
mod location;
mod reducer;
mod state;

pub use handle::QueryHandle;
pub use history::LocationHistory;
pub use intent::QueryIntent;
pub use location::Location;
pub use reducer::QueryReducer;
pub use state::{QueryState, FILTER_KEY, PAGE_KEY, SORT_BY_KEY, SORT_DIR_KEY};
