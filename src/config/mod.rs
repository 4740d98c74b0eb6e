//! Configuration loading and validation
//!
//! Linkrake is configured from a single TOML file with a `[crawl]` table
//! (where to start, how fast to go, how many workers) and an `[output]`
//! table (where the result log lives).

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{Config, CrawlConfig, OutputConfig};
pub use validation::validate;
