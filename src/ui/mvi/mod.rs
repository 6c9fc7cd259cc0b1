//! Model-View-Intent (MVI) primitives.
//!
//! Every piece of list-screen state (query, search draft, fetch snapshot)
//! is a value transformed by a pure reducer. Drivers own the side effects:
//! timers, store calls and location writes.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ State ──→ View
//!    ↑                              │
//!    └──────────────────────────────┘
//! ```

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
