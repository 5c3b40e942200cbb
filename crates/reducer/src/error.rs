use thiserror::Error;

/// Result type for reducer operations
pub type Result<T> = std::result::Result<T, ReducerError>;

/// Errors that can occur while setting up log reduction
#[derive(Error, Debug)]
pub enum ReducerError {
    /// Invalid configuration
    #[error("Invalid reducer configuration: {0}")]
    InvalidConfig(String),
}

impl ReducerError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
