//! Crawling and checking
//!
//! This module contains the whole pipeline:
//! - A blocking page client shared in shape (never in instance) by the
//!   collector and the workers
//! - Pure HTML parsing helpers for link extraction and pagination
//! - The link collector that walks the "next page" chain
//! - The check workers and the pool that fans work out to them
//! - The coordinator that sequences collect, check, persist

mod client;
mod collector;
mod coordinator;
mod parser;
mod pool;
mod worker;

pub use client::PageClient;
pub use collector::LinkCollector;
pub use coordinator::{run_pipeline, Coordinator};
pub use parser::{extract_links, find_next_page};
pub use pool::{WorkQueue, WorkerPool};
pub use worker::{CheckResult, CheckStatus, CheckWorker};
