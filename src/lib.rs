pub mod catalog;
pub mod config;
pub mod server;
pub mod store;
pub mod ui;
