//! Custom error types for the organizer
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for organizer operations
#[derive(Error, Debug)]
pub enum OrganizeError {
    /// A named input file does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Every input file was skipped (missing columns, empty or unreadable)
    #[error("No usable input files remain")]
    NoUsableFiles,

    /// Categorization requested for something other than income or expense
    #[error("Invalid finance type '{0}': expected 'income' or 'expense'")]
    InvalidFinanceType(String),

    /// Existing output file starts with a different header
    #[error("Header mismatch in {}: expected '{expected}', found '{found}'", .path.display())]
    HeaderMismatch {
        path: PathBuf,
        expected: String,
        found: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// The interactive input source was closed or failed
    #[error("Input error: {0}")]
    Input(String),
}

impl OrganizeError {
    /// Exit status reported to the invoking shell
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::FileNotFound(_) => 2,
            Self::NoUsableFiles => 3,
            Self::InvalidFinanceType(_) => 4,
            _ => 1,
        }
    }
}

impl From<std::io::Error> for OrganizeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for OrganizeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for OrganizeError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for organizer operations
pub type OrganizeResult<T> = Result<T, OrganizeError>;
