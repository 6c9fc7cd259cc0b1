//! Console-side state management, built on the MVI traits in [`mvi`].

pub mod console;
pub mod fetch;
pub mod mutation;
pub mod mvi;
pub mod query;
pub mod search;

pub use console::ListConsole;
pub use mutation::MutationCoordinator;
