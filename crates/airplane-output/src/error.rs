//! Error types for airplane-output
//!
//! Errors are split the same way the exit codes are:
//!
//! - **Validation errors**: bad values, names, path segments or config (exit code 1)
//! - **System errors**: reading configuration from disk (exit code 2)
//!
//! Writes to the output stream are not represented here. A failed write is
//! logged by the sink and never reaches the caller.

use thiserror::Error;

/// Core error type for output operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The value could not be rendered as JSON.
    #[error("marshalling output to JSON: {0}")]
    Serialization(String),

    /// A legacy output name failed the identifier pattern.
    #[error("invalid output name ({name}): expected name to match ^[a-zA-Z_0-9]*$")]
    InvalidName {
        /// The rejected name.
        name: String,
    },

    /// A dynamically built path segment was neither a string nor an integer.
    #[error("invalid path segment: {0}")]
    InvalidPathSegment(String),

    /// Emitter configuration failed to parse or validate.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("IO error: {0}")]
    Io(String),
}

impl Error {
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName { name: name.into() }
    }

    pub fn invalid_path_segment(msg: impl Into<String>) -> Self {
        Self::InvalidPathSegment(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// Returns the process exit code for this error.
    ///
    /// - 1: the caller handed us something unusable
    /// - 2: the environment failed us
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Serialization(_)
            | Self::InvalidName { .. }
            | Self::InvalidPathSegment(_)
            | Self::InvalidConfig(_) => 1,
            Self::Io(_) => 2,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::invalid_config(format!("Failed to parse config: {err}"))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::io_error(err.to_string())
    }
}

/// Result type alias for output operations
pub type Result<T> = std::result::Result<T, Error>;
