//! Error types
//!
//! [`FormatError`] covers format lookup, parsing and serialization. [`ExplainError`] covers
//! reading an explanation out of a generative-language API response; callers normally recover
//! from it by using the fallback table (see [`crate::explain::resolve`]).

use std::fmt;

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Format not found in registry
    FormatNotFound(String),
    /// Error during parsing
    ParseError(String),
    /// Error during serialization
    SerializationError(String),
    /// Format does not support the requested direction or option
    NotSupported(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            FormatError::NotSupported(msg) => write!(f, "Operation not supported: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

/// Why no explanation text could be taken from an API response
#[derive(Debug, Clone, PartialEq)]
pub enum ExplainError {
    /// The response body is not JSON of the expected shape
    Json(String),
    /// The response carries an `error` member
    Api(String),
    /// No `candidates[0].content.parts[0].text`
    MissingText,
}

impl fmt::Display for ExplainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExplainError::Json(msg) => write!(f, "Invalid response JSON: {msg}"),
            ExplainError::Api(msg) => write!(f, "API returned an error: {msg}"),
            ExplainError::MissingText => write!(f, "Response contains no explanation text"),
        }
    }
}

impl std::error::Error for ExplainError {}

impl From<serde_json::Error> for ExplainError {
    fn from(err: serde_json::Error) -> Self {
        ExplainError::Json(err.to_string())
    }
}
