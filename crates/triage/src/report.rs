use failtrace_extractor::AffectedFile;
use failtrace_reducer::ReductionStats;
use serde::Serialize;

use crate::job::JobMetadata;

/// Output of one triage run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriageReport {
    pub job: JobMetadata,
    pub cleaned_log: String,
    pub affected_files: Vec<AffectedFile>,
    pub stats: ReductionStats,
}

impl TriageReport {
    /// First `limit` affected files
    #[must_use]
    pub fn top_files(&self, limit: usize) -> &[AffectedFile] {
        &self.affected_files[..self.affected_files.len().min(limit)]
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
