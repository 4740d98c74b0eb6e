use crate::crawler::CheckResult;

/// Aggregate counts for one run's check results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub total: usize,
    pub ok: usize,
    pub failed: usize,
}

impl RunStats {
    pub fn from_results(results: &[CheckResult]) -> Self {
        let ok = results.iter().filter(|r| r.status.is_ok()).count();
        Self {
            total: results.len(),
            ok,
            failed: results.len() - ok,
        }
    }
}
