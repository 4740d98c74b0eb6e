//! Single-link reachability checks

use crate::crawler::client::PageClient;
use crate::FetchError;
use std::fmt;
use std::time::Duration;

/// Outcome classification for one checked link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// The link responded successfully
    Ok,
    /// The link could not be loaded; the cause is kept for the result row
    Failed(FetchError),
}

impl CheckStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, CheckStatus::Ok)
    }
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Ok => write!(f, "OK"),
            CheckStatus::Failed(cause) => write!(f, "ERROR: {}", cause),
        }
    }
}

/// Result of checking a single link
///
/// Produced exactly once per input link, by exactly one worker.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub url: String,
    pub status: CheckStatus,
}

/// A check worker owning one exclusive [`PageClient`]
///
/// Workers are created eagerly when the pool starts and released when it
/// stops; the client is never shared between workers.
pub struct CheckWorker {
    id: usize,
    client: PageClient,
    delay: Duration,
}

impl CheckWorker {
    pub fn new(id: usize, client: PageClient, delay: Duration) -> Self {
        Self { id, client, delay }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Performs one blocking reachability check
    ///
    /// Failures never propagate: they are converted into the result's status
    /// so one bad link cannot take down a sibling worker. No retries are
    /// attempted; retry policy would belong to the pool and none exists.
    pub fn check(&self, url: String) -> CheckResult {
        let status = match self.client.fetch(&url) {
            Ok(_) => CheckStatus::Ok,
            Err(e) => CheckStatus::Failed(e),
        };

        // Same fixed delay as collection, so the outbound rate is uniform
        std::thread::sleep(self.delay);

        tracing::info!("Worker {}: {} -> {}", self.id, url, status);
        CheckResult { url, status }
    }

    /// Releases the worker's client
    ///
    /// The pool swallows release failures during teardown; one stuck worker
    /// must not block the rest from being released.
    pub fn release(self) -> Result<(), FetchError> {
        tracing::debug!("Worker {} released", self.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_ok() {
        assert_eq!(CheckStatus::Ok.to_string(), "OK");
    }

    #[test]
    fn test_status_display_timeout() {
        let status = CheckStatus::Failed(FetchError::Timeout);
        assert_eq!(status.to_string(), "ERROR: Timeout");
    }

    #[test]
    fn test_status_display_http() {
        let status = CheckStatus::Failed(FetchError::Http(404));
        assert_eq!(status.to_string(), "ERROR: HTTP 404");
    }

    #[test]
    fn test_status_is_ok() {
        assert!(CheckStatus::Ok.is_ok());
        assert!(!CheckStatus::Failed(FetchError::Connect).is_ok());
    }

    #[test]
    fn test_check_unreachable_url_is_failure_not_panic() {
        let client = PageClient::new(Duration::from_secs(2)).unwrap();
        let worker = CheckWorker::new(1, client, Duration::ZERO);

        let result = worker.check("http://127.0.0.1:1/".to_string());
        assert_eq!(result.url, "http://127.0.0.1:1/");
        assert_eq!(result.status, CheckStatus::Failed(FetchError::Connect));
    }

    #[test]
    fn test_release_succeeds() {
        let client = PageClient::new(Duration::from_secs(2)).unwrap();
        let worker = CheckWorker::new(1, client, Duration::ZERO);
        assert!(worker.release().is_ok());
    }
}
