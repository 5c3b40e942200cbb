use serde::{Deserialize, Serialize};

/// Configuration for log noise reduction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReducerConfig {
    /// Lines kept per failing section (or for the whole log when it has no sections)
    pub max_lines_per_section: usize,

    /// Identical consecutive lines needed before a run is collapsed
    pub repeat_threshold: usize,

    /// Maximum number of consecutive blank lines kept
    pub max_blank_run: usize,
}

impl Default for ReducerConfig {
    fn default() -> Self {
        Self {
            max_lines_per_section: 150,
            repeat_threshold: 3,
            max_blank_run: 2,
        }
    }
}

impl ReducerConfig {
    /// Tight limits for consumers with a small context budget
    pub fn compact() -> Self {
        Self {
            max_lines_per_section: 60,
            max_blank_run: 1,
            ..Default::default()
        }
    }

    /// Generous limits that keep more of each failing section
    pub fn thorough() -> Self {
        Self {
            max_lines_per_section: 500,
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_lines_per_section < 2 {
            return Err(format!(
                "max_lines_per_section ({}) must be at least 2",
                self.max_lines_per_section
            ));
        }

        if self.repeat_threshold < 2 {
            return Err(format!(
                "repeat_threshold ({}) must be at least 2",
                self.repeat_threshold
            ));
        }

        Ok(())
    }
}
