use serde::{Deserialize, Serialize};

use crate::collapse::{collapse_repeats, squash_blank_runs};
use crate::config::ReducerConfig;
use crate::error::{ReducerError, Result};
use crate::markers::is_metadata_line;
use crate::sections::select_sections;
use crate::strip::{clean_line, strip_ansi};

/// Size of a log before and after reduction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReductionStats {
    pub raw_chars: usize,
    pub cleaned_chars: usize,
    pub raw_lines: usize,
    pub cleaned_lines: usize,
}

impl ReductionStats {
    fn measure(raw: &str, cleaned: &str) -> Self {
        Self {
            raw_chars: raw.chars().count(),
            cleaned_chars: cleaned.chars().count(),
            raw_lines: raw.lines().count(),
            cleaned_lines: cleaned.lines().count(),
        }
    }

    /// Fraction of characters removed (0.0 when the raw log was empty)
    #[must_use]
    pub fn reduction_ratio(&self) -> f64 {
        if self.raw_chars == 0 {
            return 0.0;
        }
        1.0 - (self.cleaned_chars as f64 / self.raw_chars as f64)
    }
}

/// Strips formatting noise from CI logs and bounds their size
#[derive(Debug, Clone, Default)]
pub struct NoiseReducer {
    config: ReducerConfig,
}

impl NoiseReducer {
    /// Create a reducer, rejecting invalid configuration
    pub fn new(config: ReducerConfig) -> Result<Self> {
        config.validate().map_err(ReducerError::invalid_config)?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &ReducerConfig {
        &self.config
    }

    /// Reduce a raw log to its cleaned form
    #[must_use]
    pub fn reduce(&self, raw: &str) -> String {
        let text = strip_ansi(&raw.replace("\r\n", "\n"));

        let lines: Vec<String> = text
            .split('\n')
            .map(clean_line)
            .filter(|line| !is_metadata_line(line))
            .map(str::to_string)
            .collect();
        let stripped = lines.len();

        let lines = squash_blank_runs(lines, self.config.max_blank_run);
        let lines = collapse_repeats(lines, self.config.repeat_threshold);
        let collapsed = lines.len();

        let lines = select_sections(lines, self.config.max_lines_per_section);

        // Dropped sections can leave equal lines adjacent.
        let lines = squash_blank_runs(lines, self.config.max_blank_run);
        let lines = collapse_repeats(lines, self.config.repeat_threshold);

        log::debug!(
            "reduced log: {stripped} lines after stripping, {collapsed} after collapsing, {} kept",
            lines.len()
        );

        lines.join("\n")
    }

    /// Reduce a raw log and report how much was removed
    #[must_use]
    pub fn reduce_with_stats(&self, raw: &str) -> (String, ReductionStats) {
        let cleaned = self.reduce(raw);
        let stats = ReductionStats::measure(raw, &cleaned);
        (cleaned, stats)
    }
}

/// Reduce `raw` with default settings and the given per-section line cap.
///
/// Caps below 2 are raised to 2.
#[must_use]
pub fn reduce(raw: &str, max_lines_per_section: usize) -> String {
    let reducer = NoiseReducer {
        config: ReducerConfig {
            max_lines_per_section: max_lines_per_section.max(2),
            ..ReducerConfig::default()
        },
    };
    reducer.reduce(raw)
}
