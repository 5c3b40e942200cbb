use std::path::PathBuf;
use thiserror::Error;

/// Result type for triage operations
pub type Result<T> = std::result::Result<T, TriageError>;

/// Errors that can end a triage run
#[derive(Error, Debug)]
pub enum TriageError {
    /// Log bytes are not valid UTF-8
    #[error("Log is not valid UTF-8: {0}")]
    Decode(#[from] std::str::Utf8Error),

    #[error(transparent)]
    Reducer(#[from] failtrace_reducer::ReducerError),

    #[error(transparent)]
    Extractor(#[from] failtrace_extractor::ExtractorError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Configuration file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML
    #[error("Failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

impl TriageError {
    /// Create an invalid config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
