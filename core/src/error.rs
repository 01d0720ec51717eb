//! Error types and handling for filescope core

use thiserror::Error;

/// Result type alias for filescope operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for filescope core
#[derive(Error, Debug)]
pub enum Error {
    /// A search pattern (content regex) could not be compiled
    #[error("Invalid search pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// A requested path could not be resolved
    #[error("Path not found: {path} ({reason})")]
    NotFound { path: String, reason: String },

    /// A requested path matched several entries equally well
    #[error("Ambiguous path '{path}', candidates: {}", candidates.join(", "))]
    Ambiguous {
        path: String,
        candidates: Vec<String>,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tool execution errors
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive (zip/jar) errors
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),


    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },

    #[error("Project root not found: {path}")]
    RootNotFound { path: String },

    #[error("Project root is not a directory: {path}")]
    RootNotDirectory { path: String },
}

/// Tool execution errors
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Tool not found: {name}")]
    NotFound { name: String },

    #[error("Invalid tool parameters: {message}")]
    InvalidParameters { message: String },
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Generic(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Generic(msg.to_string())
    }
}
