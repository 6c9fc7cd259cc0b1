use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub console: ConsoleConfig,
}

/// Reference backend settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the HTTP server (host:port).
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Lower bound of the simulated response latency in milliseconds.
    #[serde(default = "default_latency_min_ms")]
    pub latency_min_ms: u64,
    /// Upper bound of the simulated response latency in milliseconds (0 disables).
    #[serde(default = "default_latency_max_ms")]
    pub latency_max_ms: u64,
    /// Number of demo products generated at startup.
    #[serde(default = "default_seed_count")]
    pub seed_count: usize,
    /// RNG seed for the demo catalogue.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

/// Settings for talking to a remote backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Origin of the backend (scheme + host + port).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// List screen behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Rows per page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Quiet period before typed search text is committed, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_latency_min_ms() -> u64 {
    200
}

fn default_latency_max_ms() -> u64 {
    600
}

fn default_seed_count() -> usize {
    200
}

fn default_seed() -> u64 {
    42
}

fn default_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_page_size() -> usize {
    10
}

fn default_debounce_ms() -> u64 {
    300
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            latency_min_ms: default_latency_min_ms(),
            latency_max_ms: default_latency_max_ms(),
            seed_count: default_seed_count(),
            seed: default_seed(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            debounce_ms: default_debounce_ms(),
        }
    }
}
