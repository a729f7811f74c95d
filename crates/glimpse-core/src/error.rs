//! Error types for Glimpse.
//!
//! Errors are organized by phase: configuration, startup loading of the data
//! files, and term lookup at query time. Load errors are fatal; lookup misses
//! are expected and handled by the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Glimpse operations.
#[derive(Error, Debug)]
pub enum GlimpseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors while loading the tag cache or the embedding table
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Startup load errors. Any of these aborts initialization.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be opened
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading failed part-way through the file
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line of the embedding table is malformed
    #[error("Malformed entry in {path} at line {line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A vector's length differs from the first vector in the table
    #[error("Dimension mismatch in {path} at line {line}: expected {expected}, found {found}")]
    Dimension {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    /// The tag cache is unreadable or not a valid cache document
    #[error("Invalid tag cache {path}: {message}")]
    TagCache { path: PathBuf, message: String },
}

/// Query-time lookup errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// The term has no embedding
    #[error("No embedding for term '{term}'")]
    NotFound { term: String },
}

/// Convenience type alias for Glimpse results.
pub type Result<T> = std::result::Result<T, GlimpseError>;

/// Convenience type alias for load results.
pub type LoadResult<T> = std::result::Result<T, LoadError>;
