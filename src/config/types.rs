use serde::Deserialize;
use std::time::Duration;

/// Main configuration structure for linkrake
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    pub output: OutputConfig,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Catalog page the pagination walk starts from
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Fixed delay after every outbound request (milliseconds),
    /// applied during collection and checking alike
    #[serde(rename = "delay-ms")]
    pub delay_ms: u64,

    /// Number of parallel check workers
    #[serde(rename = "worker-count")]
    pub worker_count: u32,

    /// Wall-clock bound on the collection phase (seconds)
    #[serde(rename = "collector-timeout-secs")]
    pub collector_timeout_secs: u64,

    /// Per-request timeout for every fetch, collection and checking (seconds)
    #[serde(rename = "fetch-timeout-secs")]
    pub fetch_timeout_secs: u64,
}

impl CrawlConfig {
    /// The fixed delay between outbound requests
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// The wall-clock bound on collection
    pub fn collector_timeout(&self) -> Duration {
        Duration::from_secs(self.collector_timeout_secs)
    }

    /// The per-request timeout
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the CSV result log
    #[serde(rename = "log-path")]
    pub log_path: String,
}
