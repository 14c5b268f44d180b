//! Error types for the bikeshare explorer
//!
//! Provides structured error handling with context and proper error chains.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the bikeshare explorer
#[derive(Error, Debug)]
pub enum BikeshareError {
    /// File system operation errors
    #[error("File system error: {operation} failed on {path}")]
    FileSystem {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV content
    #[error("CSV error in {path}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A required column is absent from the header row
    #[error("Missing required column '{column}' in {path}")]
    MissingColumn { column: String, path: PathBuf },

    /// A cell could not be parsed into the column's type
    #[error("Invalid value '{value}' in column '{column}' at row {row} of {path}")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
        path: PathBuf,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Reading from or writing to the console failed
    #[error("Console error")]
    Console {
        #[source]
        source: std::io::Error,
    },

    /// The console input stream ended while an answer was expected
    #[error("Input closed while waiting for an answer")]
    InputClosed,
}

impl BikeshareError {
    /// Create a new file system error
    pub fn file_system<P: Into<PathBuf>>(
        operation: impl Into<String>,
        path: P,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    /// Create a new CSV error
    pub fn csv<P: Into<PathBuf>>(path: P, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }

    /// Create a new missing column error
    pub fn missing_column<P: Into<PathBuf>>(column: impl Into<String>, path: P) -> Self {
        Self::MissingColumn {
            column: column.into(),
            path: path.into(),
        }
    }

    /// Create a new invalid value error
    pub fn invalid_value<P: Into<PathBuf>>(
        column: impl Into<String>,
        row: usize,
        value: impl Into<String>,
        path: P,
    ) -> Self {
        Self::InvalidValue {
            column: column.into(),
            row,
            value: value.into(),
            path: path.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new console error
    pub fn console(source: std::io::Error) -> Self {
        Self::Console { source }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, BikeshareError>;
