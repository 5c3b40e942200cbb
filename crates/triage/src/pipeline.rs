use failtrace_extractor::{Extractor, LinkBuilder};
use failtrace_reducer::NoiseReducer;

use crate::config::TriageConfig;
use crate::error::Result;
use crate::job::JobMetadata;
use crate::report::TriageReport;

/// Reduce a raw log, then extract affected files from the cleaned text.
///
/// A pipeline holds only validated configuration, so one instance can be
/// shared across threads and runs.
#[derive(Debug, Clone)]
pub struct Pipeline {
    reducer: NoiseReducer,
    extractor: Extractor,
    links: LinkBuilder,
}

impl Pipeline {
    pub fn new(config: TriageConfig, links: LinkBuilder) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            reducer: NoiseReducer::new(config.reducer)?,
            extractor: Extractor::new(config.extractor)?,
            links,
        })
    }

    #[must_use]
    pub fn links(&self) -> &LinkBuilder {
        &self.links
    }

    #[must_use]
    pub fn run(&self, raw: &str, job: &JobMetadata) -> TriageReport {
        let (cleaned_log, stats) = self.reducer.reduce_with_stats(raw);
        let affected_files = self.extractor.extract(&cleaned_log, &self.links);

        log::info!(
            "reduced log {} -> {} chars ({:.0}% smaller), {} affected files",
            stats.raw_chars,
            stats.cleaned_chars,
            stats.reduction_ratio() * 100.0,
            affected_files.len()
        );

        TriageReport {
            job: job.clone(),
            cleaned_log,
            affected_files,
            stats,
        }
    }

    /// Decode `raw` as UTF-8 and run; undecodable input is the one log-level failure.
    pub fn run_bytes(&self, raw: &[u8], job: &JobMetadata) -> Result<TriageReport> {
        let text = std::str::from_utf8(raw)?;
        Ok(self.run(text, job))
    }
}
