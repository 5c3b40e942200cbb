use failtrace_extractor::ExtractorConfig;
use failtrace_reducer::ReducerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, TriageError};

/// Full pipeline configuration, as loaded from a `failtrace.toml`:
///
/// ```toml
/// [reducer]
/// max_lines_per_section = 80
///
/// [extractor]
/// filter_libraries = true
/// extra_workspace_prefixes = ["/srv/ci/checkout"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TriageConfig {
    pub reducer: ReducerConfig,
    pub extractor: ExtractorConfig,
}

impl TriageConfig {
    /// Small output for consumers with a tight context budget
    pub fn compact() -> Self {
        Self {
            reducer: ReducerConfig::compact(),
            extractor: ExtractorConfig {
                max_files: Some(10),
                ..Default::default()
            },
        }
    }

    /// Keep more of each failing section and every reference
    pub fn thorough() -> Self {
        Self {
            reducer: ReducerConfig::thorough(),
            extractor: ExtractorConfig::default(),
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| TriageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded configuration from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Validate both stages
    pub fn validate(&self) -> Result<()> {
        self.reducer
            .validate()
            .map_err(|msg| TriageError::config(format!("reducer: {msg}")))?;
        self.extractor
            .validate()
            .map_err(|msg| TriageError::config(format!("extractor: {msg}")))?;
        Ok(())
    }
}
