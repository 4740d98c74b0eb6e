//! Blocking page client
//!
//! All network I/O in linkrake goes through this client. It is deliberately
//! blocking: the collector and the check workers run on the blocking thread
//! pool, and the async layer only awaits their completion. Construct it on a
//! blocking thread too; reqwest's blocking API must stay off the runtime
//! worker threads.

use crate::FetchError;
use reqwest::blocking::Client;
use std::time::Duration;

const USER_AGENT: &str = concat!("linkrake/", env!("CARGO_PKG_VERSION"));

/// A blocking HTTP client owned by exactly one collector or check worker
#[derive(Debug)]
pub struct PageClient {
    client: Client,
}

impl PageClient {
    /// Builds a client with the given per-request timeout
    pub fn new(fetch_timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(fetch_timeout)
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client })
    }

    /// Fetches a URL and returns the response body
    ///
    /// Transport failures and non-success statuses are classified into
    /// [`FetchError`]; the caller decides whether that truncates collection
    /// or becomes an `ERROR:` status row.
    pub fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().map_err(classify_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http(status.as_u16()));
        }

        response.text().map_err(classify_error)
    }
}

/// Classifies a reqwest error into a fetch failure category
fn classify_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_connect() {
        FetchError::Connect
    } else {
        FetchError::Request(e.to_string())
    }
}
