//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod scripted_store;

use std::net::{SocketAddr, TcpListener};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use catalog_console::catalog::{Product, ProductStatus};
use catalog_console::config::ServerConfig;
use catalog_console::server::{CatalogServer, Latency, ServerHandle};
use catalog_console::store::RecordStore;
use rust_decimal::Decimal;
use tempfile::TempDir;

pub use scripted_store::{PendingList, ScriptedStore};

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// Create a temporary config file with the given TOML body.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Wait for a server to become available.
pub async fn wait_for_server(addr: SocketAddr, timeout: Duration) -> bool {
    let start = std::time::Instant::now();
    while start.elapsed() < timeout {
        if tokio::net::TcpStream::connect(addr).await.is_ok() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

/// Start a catalog server on a free local port with no simulated latency.
pub async fn start_server(store: Arc<dyn RecordStore>) -> (SocketAddr, ServerHandle) {
    let config = ServerConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        ..ServerConfig::default()
    };
    let mut server = CatalogServer::with_latency(&config, store, Latency::none());
    let addr = server.try_bind().await.expect("Failed to bind server");
    let handle = server.handle();
    tokio::spawn(async move {
        let _ = server.run().await;
    });
    assert!(wait_for_server(addr, Duration::from_secs(5)).await);
    (addr, handle)
}

// -- Records ------------------------------------------------------------------

/// Draft product with a price given in cents.
pub fn product(id: &str, name: &str, price_cents: i64, stock: u64) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        price: Decimal::new(price_cents, 2),
        stock,
        status: ProductStatus::Draft,
        published_at: None,
    }
}

/// `count` products named "Item 0".."Item n" with ids "p0".."pn".
pub fn catalogue(count: usize) -> Vec<Product> {
    (0..count)
        .map(|i| product(&format!("p{}", i), &format!("Item {}", i), 100 + i as i64, i as u64))
        .collect()
}

pub fn ids(products: &[Product]) -> Vec<&str> {
    products.iter().map(|p| p.id.as_str()).collect()
}
