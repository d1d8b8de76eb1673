//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! Only fatal conditions are errors. Schema conflicts, unresolved selectors and
//! skipped merges are reported through `tracing` and returned as outcome values
//! by the operations that detect them.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// A document could not be read from or written to YAML / JSON.
    #[from(ignore)]
    #[display("Document Error: {_0}")]
    Yaml(String),

    /// Documentation markup did not have the structure the parser relies on.
    ///
    /// Fatal for the endpoint being parsed; callers skip that endpoint.
    #[from(ignore)]
    #[display("Malformed Input: {_0}")]
    MalformedInput(String),

    /// A path assignment met a non-object node before its final segment.
    #[from(ignore)]
    #[display("Expected an object at '{_0}'")]
    NotAnObject(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Yaml(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Yaml(err.to_string())
    }
}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
