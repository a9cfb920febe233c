use thiserror::Error;

/// Unified error type for git-relnotes operations
#[derive(Error, Debug)]
pub enum RelnotesError {
    #[error("Release resolution error: {0}")]
    Release(String),

    #[error("Git command failed: {0}")]
    Git(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Credential error: {0}")]
    Credential(String),

    #[error("Issue tracker request failed: {0}")]
    Tracker(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in git-relnotes
pub type Result<T> = std::result::Result<T, RelnotesError>;

impl RelnotesError {
    /// Create a release resolution error with context
    pub fn release(msg: impl Into<String>) -> Self {
        RelnotesError::Release(msg.into())
    }

    /// Create a git command error with context
    pub fn git(msg: impl Into<String>) -> Self {
        RelnotesError::Git(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        RelnotesError::Config(msg.into())
    }

    /// Create a credential error with context
    pub fn credential(msg: impl Into<String>) -> Self {
        RelnotesError::Credential(msg.into())
    }
}
