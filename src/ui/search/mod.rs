//! Debounced search box: a local draft committed to the query after a
//! quiet period, on submit, or on clear.

mod input;
mod intent;
mod reducer;
mod state;

pub use input::DebouncedInput;
pub use intent::SearchIntent;
pub use reducer::SearchReducer;
pub use state::{SearchState, DEFAULT_QUIET_PERIOD};
