//! TOML configuration: file location, defaults, validation and a shared store.

mod loader;
mod store;
mod types;

pub use loader::ConfigError;
pub use store::ConfigStore;
pub use types::{ClientConfig, Config, ConsoleConfig, ServerConfig};
