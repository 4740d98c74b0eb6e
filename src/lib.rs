//! Linkrake: a paginated catalog link checker
//!
//! This crate walks a catalog site's "next page" chain to collect every
//! same-site link, then verifies each link is reachable using a fixed-size
//! pool of blocking check workers bridged onto the async runtime, and
//! appends the outcomes to a CSV result log whose ids continue across runs.

pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for linkrake operations
#[derive(Debug, Error)]
pub enum RakeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("URL has no host: {0}")]
    MissingHost(String),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Classification of a single failed page request
///
/// The `Display` rendering of a variant is the `<cause>` recorded in
/// `ERROR: <cause>` result rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Timeout")]
    Timeout,

    #[error("Connection failed")]
    Connect,

    #[error("HTTP {0}")]
    Http(u16),

    #[error("{0}")]
    Request(String),
}

/// Result type alias for linkrake operations
pub type Result<T> = std::result::Result<T, RakeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use crate::config::Config;
pub use crate::crawler::{CheckResult, CheckStatus};
pub use crate::url::{extract_domain, same_site};
