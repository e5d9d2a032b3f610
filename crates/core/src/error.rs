//! Record error model.

use std::path::PathBuf;

use thiserror::Error;

/// Result type used across the record and store layers.
pub type RecordResult<T> = Result<T, RecordError>;

/// Record-level error.
///
/// Every variant is recoverable: callers report the message and carry on.
#[derive(Debug, Error)]
pub enum RecordError {
    /// A field failed validation at construction or update time.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A positional operation addressed a slot that does not exist.
    #[error("index {index} out of range (collection has {len} records)")]
    IndexOutOfRange { index: usize, len: usize },

    /// The file to load does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// A document is not valid JSON or matches no known record shape.
    #[error("format error: {0}")]
    Format(String),

    /// A typed field could not be parsed from its textual form.
    #[error("parse error: {0}")]
    Parse(String),

    /// Reading or writing a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RecordError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn format(msg: impl Into<String>) -> Self {
        Self::Format(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Short machine-friendly name of the error kind (used in logs and load reports).
    pub fn kind(&self) -> &'static str {
        match self {
            RecordError::Validation(_) => "validation",
            RecordError::IndexOutOfRange { .. } => "index_out_of_range",
            RecordError::FileNotFound(_) => "file_not_found",
            RecordError::Format(_) => "format",
            RecordError::Parse(_) => "parse",
            RecordError::Io { .. } => "io",
        }
    }
}
