/*!
 * Error types for the mixsub application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur while discovering videos, subtitles and comment files
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// Error when a directory cannot be listed
    #[error("Failed to read directory: {0}")]
    ReadDir(String),

    /// Error when listing embedded tracks fails
    #[error("Failed to probe embedded tracks: {0}")]
    Probe(String),
}

/// Errors that can occur when aligning episodes
#[derive(Error, Debug)]
pub enum AlignError {
    /// No episode order could be inferred from the video names
    #[error("Episode order could not be inferred from {count} video name(s)")]
    OrderNotInferred {
        /// Number of videos that were offered
        count: usize,
    },
}

/// Errors found while validating the configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The output tag is empty or contains a path separator
    #[error("Invalid output tag: {0:?}")]
    InvalidTag(String),

    /// A filter expression does not compile
    #[error("Invalid filter expression {pattern:?}: {message}")]
    InvalidFilter {
        /// The offending expression
        pattern: String,
        /// Message from the regex compiler
        message: String,
    },

    /// An extension list has no entries
    #[error("No {0} extensions configured")]
    EmptyExtensions(&'static str),

    /// Probing is enabled with a concurrency limit of zero
    #[error("max_concurrent_probes must be at least 1")]
    NoProbeConcurrency,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from discovery
    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    /// Error from alignment
    #[error("Alignment error: {0}")]
    Align(#[from] AlignError),

    /// Error from configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
