use serde::{Deserialize, Serialize};

/// Configuration for file reference extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Drop references into standard libraries, vendored and installed packages
    pub filter_libraries: bool,

    /// Shortest accepted path token (in characters)
    pub min_path_len: usize,

    /// Longest accepted path token (in characters)
    pub max_path_len: usize,

    /// Additional checkout roots to strip, e.g. `/srv/ci/checkout`
    pub extra_workspace_prefixes: Vec<String>,

    /// Optional cap on the number of affected files returned
    pub max_files: Option<usize>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            filter_libraries: true,
            min_path_len: 3,
            max_path_len: 200,
            extra_workspace_prefixes: Vec::new(),
            max_files: None,
        }
    }
}

impl ExtractorConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.min_path_len == 0 {
            return Err("min_path_len must be greater than 0".to_string());
        }

        if self.min_path_len > self.max_path_len {
            return Err(format!(
                "min_path_len ({}) cannot exceed max_path_len ({})",
                self.min_path_len, self.max_path_len
            ));
        }

        if self.max_files == Some(0) {
            return Err("max_files must be greater than 0 when set".to_string());
        }

        if let Some(prefix) = self
            .extra_workspace_prefixes
            .iter()
            .find(|p| p.trim_matches(|c| c == '/' || c == '\\').is_empty())
        {
            return Err(format!("workspace prefix '{prefix}' is empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = ExtractorConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.filter_libraries);
        assert_eq!(config.max_path_len, 200);
    }

    #[test]
    fn test_config_validation() {
        let mut config = ExtractorConfig {
            min_path_len: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.min_path_len = 300;
        assert!(config.validate().is_err());

        config.min_path_len = 3;
        config.max_files = Some(0);
        assert!(config.validate().is_err());

        config.max_files = Some(10);
        config.extra_workspace_prefixes = vec!["/".to_string()];
        assert!(config.validate().is_err());

        config.extra_workspace_prefixes = vec!["/srv/checkout".to_string()];
        assert!(config.validate().is_ok());
    }
}
