//! Error types for the address resolver.
//!
//! All fallible operations return [`ResolverError`]. Note that the correction
//! and query-synthesis core never fails on noisy input: unknown tokens are
//! dropped and insufficient input yields no query. Errors surface only at the
//! I/O boundaries (dictionary, stop-word, configuration and row loading) and
//! from query executors.
//!
//! # Examples
//!
//! ```
//! use address_resolver::error::{ResolverError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(ResolverError::dictionary("empty word in frequency table"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for resolver operations.
#[derive(Error, Debug)]
pub enum ResolverError {
    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Dictionary loading errors
    #[error("Dictionary error: {0}")]
    Dictionary(String),

    /// Analysis-related errors (tokenization, extraction patterns)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Invalid query synthesis settings
    #[error("Query error: {0}")]
    Query(String),

    /// Query execution errors reported by an executor
    #[error("Execution error: {0}")]
    Execution(String),

}

/// Result type alias for operations that may fail with ResolverError.
pub type Result<T> = std::result::Result<T, ResolverError>;

impl ResolverError {
    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        ResolverError::Config(msg.into())
    }

    /// Create a new dictionary error.
    pub fn dictionary<S: Into<String>>(msg: S) -> Self {
        ResolverError::Dictionary(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        ResolverError::Analysis(msg.into())
    }

    /// Create a new query error.
    pub fn query<S: Into<String>>(msg: S) -> Self {
        ResolverError::Query(msg.into())
    }

    /// Create a new execution error.
    pub fn execution<S: Into<String>>(msg: S) -> Self {
        ResolverError::Execution(msg.into())
    }
}
