//! Result persistence and run summaries

mod csv_log;
mod stats;
mod traits;

pub use csv_log::CsvResultLog;
pub use stats::RunStats;
pub use traits::ResultSink;
