//! Reference HTTP backend serving the products API.

pub mod error;
pub mod handlers;
pub mod health;
pub mod router;
pub mod shutdown;

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::store::RecordStore;

pub use error::{ApiError, ServerError};
pub use handlers::{AppState, Latency};
pub use router::build_router;
pub use shutdown::ShutdownManager;

/// Highest number of ports tried past the configured one.
const PORT_FALLBACK_RANGE: u16 = 100;

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();
}

pub struct CatalogServer {
    pub addr: SocketAddr,
    bind_addr: String,
    /// Populated by try_bind(), consumed by run().
    listener: Option<TcpListener>,
    state: AppState,
    shutdown: Arc<ShutdownManager>,
}

impl CatalogServer {
    pub fn new(config: &ServerConfig, store: Arc<dyn RecordStore>) -> Self {
        Self::with_latency(config, store, Latency::from_config(config))
    }

    pub fn with_latency(config: &ServerConfig, store: Arc<dyn RecordStore>, latency: Latency) -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            bind_addr: config.bind_addr.clone(),
            listener: None,
            state: AppState { store, latency },
            shutdown: Arc::new(ShutdownManager::new()),
        }
    }

    /// Binds the configured address, moving up through the next ports if
    /// it is taken. Port 0 asks the OS for any free port.
    pub async fn try_bind(&mut self) -> Result<SocketAddr, ServerError> {
        let bind_addr: SocketAddr =
            self.bind_addr
                .parse()
                .map_err(|e: std::net::AddrParseError| ServerError::InvalidBindAddr {
                    addr: self.bind_addr.clone(),
                    reason: e.to_string(),
                })?;

        let start = bind_addr.port();
        let end = start.saturating_add(PORT_FALLBACK_RANGE);
        for port in start..=end {
            match TcpListener::bind(SocketAddr::new(bind_addr.ip(), port)).await {
                Ok(listener) => {
                    let actual = listener.local_addr()?;
                    self.addr = actual;
                    self.listener = Some(listener);
                    tracing::info!("Catalog server bound to {}", actual);
                    return Ok(actual);
                }
                Err(e) => {
                    tracing::debug!("Port {} busy: {}", port, e);
                }
            }
        }

        Err(ServerError::NoFreePort { start, end })
    }

    pub fn handle(&self) -> ServerHandle {
        ServerHandle {
            shutdown: self.shutdown.clone(),
        }
    }

    /// Serves until shutdown is signalled. Call try_bind() first.
    pub async fn run(self) -> Result<(), ServerError> {
        let listener = self.listener.ok_or(ServerError::NotBound)?;

        tracing::info!("Starting catalog server on {}", self.addr);

        let app = build_router(self.state);
        let shutdown = self.shutdown.clone();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                if let Err(e) = shutdown.wait_for_shutdown().await {
                    tracing::warn!("Signal handler failed: {}", e);
                }
            })
            .into_future()
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

#[derive(Clone)]
pub struct ServerHandle {
    shutdown: Arc<ShutdownManager>,
}

impl ServerHandle {
    pub fn shutdown(&self) {
        self.shutdown.signal_shutdown();
    }
}
