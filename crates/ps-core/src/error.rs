//! Error types for ps-core

use thiserror::Error;

/// Core error type for planspeak
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Configuration file not found
    #[error("[C001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C002: Failed to parse configuration file
    #[error("[C002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// C003: Invalid configuration value
    #[error("[C003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// C004: Dataset split file not found
    #[error("[C004] Dataset split '{split}' not found at {path}")]
    SplitNotFound { split: String, path: String },

    /// C005: Dataset split file is not a valid record array
    #[error("[C005] Failed to decode dataset file {path}: {source}")]
    DatasetDecode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// C006: IO error with the offending path
    #[error("[C006] IO error at {path}: {source}")]
    IoWithPath {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<serde_yaml::Error> for CoreError {
    fn from(err: serde_yaml::Error) -> Self {
        CoreError::ConfigParseError {
            message: err.to_string(),
        }
    }
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// C010: A fixed-arity scalar operator was built with the wrong operand count.
///
/// `Arithmetic`, `Compare` and `Intrinsic` always take exactly two operands.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("[C010] {operator} expects {expected} operands, found {found}")]
pub struct ArityError {
    /// Scalar operator name (e.g. `Arithmetic`)
    pub operator: &'static str,
    /// Required operand count
    pub expected: usize,
    /// Operand count actually supplied
    pub found: usize,
}
