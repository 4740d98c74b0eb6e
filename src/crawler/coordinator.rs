//! Pipeline orchestration: collect, check, persist
//!
//! The coordinator owns the sequencing and nothing else: the collector
//! gathers the links, the pool checks them, the sink appends the rows. All
//! blocking work happens on the blocking thread pool; this layer only
//! awaits.

use crate::config::Config;
use crate::crawler::collector::LinkCollector;
use crate::crawler::pool::WorkerPool;
use crate::output::{CsvResultLog, ResultSink, RunStats};
use crate::RakeError;
use url::Url;

/// Runs one full collect-check-persist pipeline
pub struct Coordinator {
    config: Config,
}

impl Coordinator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Runs the pipeline once
    ///
    /// Short-circuits after collection when nothing was found. The pool is
    /// torn down whether or not the checks succeeded. Results land in the
    /// log in completion order; persisted ids follow that order, not the
    /// input order.
    pub async fn run(self) -> Result<(), RakeError> {
        let crawl = &self.config.crawl;
        let base_url = Url::parse(&crawl.base_url)?;

        tracing::info!("Collecting links from {}", base_url);
        let collector = LinkCollector::new(
            base_url,
            crawl.delay(),
            crawl.collector_timeout(),
            crawl.fetch_timeout(),
        );
        let links = collector.collect().await?;
        tracing::info!("Collected {} links", links.len());

        if links.is_empty() {
            tracing::warn!("No links collected, nothing to check");
            return Ok(());
        }

        let mut pool =
            WorkerPool::new(crawl.worker_count, crawl.delay(), crawl.fetch_timeout()).await?;
        let checked = pool.run_checks(links).await;
        // Workers are torn down whether or not the checks succeeded
        pool.shutdown();
        let results = checked?;

        let stats = RunStats::from_results(&results);
        tracing::info!(
            "Checked {} links: {} ok, {} failed",
            stats.total,
            stats.ok,
            stats.failed
        );

        let sink = CsvResultLog::new(&self.config.output.log_path);
        sink.append(&results)?;
        tracing::info!("Results appended to {}", self.config.output.log_path);

        Ok(())
    }
}

/// Runs the full pipeline with the given configuration
///
/// This is the main library entry point used by the binary.
pub async fn run_pipeline(config: Config) -> Result<(), RakeError> {
    Coordinator::new(config).run().await
}
