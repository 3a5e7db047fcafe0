use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for dove operations
#[derive(Error, Debug)]
pub enum DoveError {
    #[error("Configuration not found at {}: {source}", path.display())]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration is invalid: {0}")]
    ConfigInvalid(String),

    #[error("Version position error: {0}")]
    IndexOutOfRange(String),

    #[error("Format error: {0}")]
    FormatMismatch(String),

    #[error("Alternate format not found: {0}")]
    AlternateNotFound(String),

    #[error("Command `{command}` failed: {reason}")]
    ProcessFailure {
        command: String,
        reason: String,
        code: Option<i32>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results in dove
pub type Result<T> = std::result::Result<T, DoveError>;

impl DoveError {
    /// Create a config-not-found error for the given path
    pub fn config_not_found(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DoveError::ConfigNotFound {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid configuration error with context
    pub fn config_invalid(msg: impl Into<String>) -> Self {
        DoveError::ConfigInvalid(msg.into())
    }

    /// Create a position error with context
    pub fn index_out_of_range(msg: impl Into<String>) -> Self {
        DoveError::IndexOutOfRange(msg.into())
    }

    /// Create a template error with context
    pub fn format_mismatch(msg: impl Into<String>) -> Self {
        DoveError::FormatMismatch(msg.into())
    }

    /// Create an error for a missing alternate
    pub fn alternate_not_found(name: impl Into<String>) -> Self {
        DoveError::AlternateNotFound(name.into())
    }

    /// Create a subprocess error
    pub fn process(command: impl Into<String>, reason: impl Into<String>, code: Option<i32>) -> Self {
        DoveError::ProcessFailure {
            command: command.into(),
            reason: reason.into(),
            code,
        }
    }

    /// Process exit status to report for this error.
    ///
    /// A failed subprocess hands its own exit code through; everything else is `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            DoveError::ProcessFailure {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}
