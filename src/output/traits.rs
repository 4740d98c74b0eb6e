use crate::crawler::CheckResult;
use crate::RakeError;

/// An append-only destination for check results
///
/// The pipeline only ever appends; nothing downstream reads results back.
pub trait ResultSink {
    /// Appends one row per result, generating timestamps at write time
    fn append(&self, results: &[CheckResult]) -> Result<(), RakeError>;
}
