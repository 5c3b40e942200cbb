use thiserror::Error;

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, ExtractorError>;

/// Errors raised while validating extraction inputs.
///
/// Log content itself never produces an error; only identifiers and
/// configuration supplied by the caller are validated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractorError {
    /// Repository identifier is not `owner/name`
    #[error("Invalid repository identifier '{0}': expected owner/name")]
    InvalidRepository(String),

    /// Commit identifier is not a 7-64 character hex string
    #[error("Invalid commit identifier '{0}': expected 7-64 hex characters")]
    InvalidCommit(String),

    /// Server URL is not an http(s) origin
    #[error("Invalid server URL '{0}'")]
    InvalidServerUrl(String),

    /// Invalid configuration
    #[error("Invalid extractor configuration: {0}")]
    InvalidConfig(String),
}

impl ExtractorError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
