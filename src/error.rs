use thiserror::Error;

/// Unified error type for release-kit operations
#[derive(Error, Debug)]
pub enum ReleaseKitError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Missing argument: {0}")]
    MissingArgument(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-kit
pub type Result<T> = std::result::Result<T, ReleaseKitError>;

impl ReleaseKitError {
    /// Create a missing-argument error with context
    pub fn missing_argument(msg: impl Into<String>) -> Self {
        ReleaseKitError::MissingArgument(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseKitError::Version(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        ReleaseKitError::Tag(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        ReleaseKitError::Remote(msg.into())
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        ReleaseKitError::Manifest(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseKitError::Config(msg.into())
    }
}
