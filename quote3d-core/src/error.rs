/// Error types for mesh metrology and quoting
use thiserror::Error;

/// Result type alias used across the core crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading, measuring or pricing a mesh.
///
/// Every variant is recoverable: the caller rejects the current operation and
/// asks the user for new input. The same input always fails the same way.
#[derive(Debug, Error)]
pub enum Error {
    /// Vertex buffer is empty or its length is not a multiple of 9
    #[error("invalid mesh: {0}")]
    InvalidMesh(String),

    /// Pricing parameter is non-finite or out of range
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// File extension has no registered loader
    #[error("unsupported format: .{extension}")]
    UnsupportedFormat { extension: String },

    /// Bytes could not be parsed as the detected format
    #[error("failed to parse {format} data: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    /// Configuration JSON is malformed
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    pub fn invalid_mesh(details: impl Into<String>) -> Self {
        Self::InvalidMesh(details.into())
    }

    pub fn invalid_input(details: impl Into<String>) -> Self {
        Self::InvalidInput(details.into())
    }

    pub fn parse(format: &'static str, message: impl Into<String>) -> Self {
        Self::Parse {
            format,
            message: message.into(),
        }
    }
}
