//! Link collection across the pagination chain
//!
//! The collector walks the "next page" chain from the base URL, accumulating
//! every same-site link it sees. The walk is bounded two ways: a wall-clock
//! timeout, and a visited-page set that catches pagination cycles (a next
//! link pointing back at an earlier page would otherwise loop forever).

use crate::crawler::client::PageClient;
use crate::crawler::parser::{extract_links, find_next_page};
use crate::url::{extract_domain, same_site};
use crate::RakeError;
use std::collections::HashSet;
use std::time::{Duration, Instant};
use url::Url;

/// Collects same-site links by following the catalog's pagination chain
pub struct LinkCollector {
    base_url: Url,
    delay: Duration,
    timeout: Duration,
    fetch_timeout: Duration,
}

impl LinkCollector {
    /// Creates a collector
    ///
    /// # Arguments
    ///
    /// * `base_url` - The catalog page the walk starts from
    /// * `delay` - Fixed delay applied after each page fetch
    /// * `timeout` - Wall-clock bound on the whole collection phase
    /// * `fetch_timeout` - Per-request timeout for the page client
    pub fn new(base_url: Url, delay: Duration, timeout: Duration, fetch_timeout: Duration) -> Self {
        Self {
            base_url,
            delay,
            timeout,
            fetch_timeout,
        }
    }

    /// Runs the blocking collection loop on the blocking pool and awaits it
    ///
    /// Returns the collected links sorted, so callers see a deterministic
    /// order.
    pub async fn collect(self) -> Result<Vec<String>, RakeError> {
        let links = tokio::task::spawn_blocking(move || self.collect_blocking()).await??;
        Ok(links)
    }

    /// The collection loop proper
    ///
    /// Blocking: builds its own client, fetches pages and sleeps between
    /// requests. A failed page fetch truncates pagination but keeps whatever
    /// was collected so far; it never fails the run.
    fn collect_blocking(&self) -> Result<Vec<String>, RakeError> {
        let site_host = extract_domain(&self.base_url)
            .ok_or_else(|| RakeError::MissingHost(self.base_url.to_string()))?;
        let client = PageClient::new(self.fetch_timeout)?;

        let mut links: HashSet<String> = HashSet::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut current = self.base_url.clone();
        let started = Instant::now();

        loop {
            // Cycle guard: a next link pointing at any prior page ends the walk
            if visited.contains(current.as_str()) {
                tracing::debug!("Already visited {}, stopping collection", current);
                break;
            }

            if started.elapsed() > self.timeout {
                tracing::warn!(
                    "Collection timeout ({:?}) reached, stopping at {}",
                    self.timeout,
                    current
                );
                break;
            }

            visited.insert(current.to_string());

            let body = match client.fetch(current.as_str()) {
                Ok(body) => body,
                Err(e) => {
                    tracing::warn!("Fetch failed for {}: {}, stopping collection", current, e);
                    break;
                }
            };

            std::thread::sleep(self.delay);

            for link in extract_links(&body, &current) {
                let on_site = extract_domain(&link)
                    .map(|host| same_site(&site_host, &host))
                    .unwrap_or(false);

                if on_site {
                    links.insert(link.into());
                }
            }

            tracing::info!("Page {}: {} links collected so far", current, links.len());

            match find_next_page(&body, &current) {
                Some(next) => current = next,
                None => break,
            }
        }

        let mut sorted: Vec<String> = links.into_iter().collect();
        sorted.sort();
        Ok(sorted)
    }
}
