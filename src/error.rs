//! Error types for record parsing and graph construction

use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, QualityError>;

/// Fatal errors: any of these aborts the run before a report is written
#[derive(Debug, Error)]
pub enum QualityError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: {source}", path.display())]
    Record {
        path: PathBuf,
        line: usize,
        #[source]
        source: RecordError,
    },

    #[error("vertex {vertex} is outside the graph's range 0..{vertex_count}")]
    VertexOutOfRange { vertex: u32, vertex_count: usize },
}

/// Why a single input line could not be turned into a record
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("expected {expected} fields, found {found}")]
    MissingField { expected: usize, found: usize },

    #[error("invalid integer {token:?}: {source}")]
    InvalidInteger {
        token: String,
        #[source]
        source: ParseIntError,
    },

    #[error("cluster token {token:?} contains no digits")]
    NoDigits { token: String },

    #[error("malformed cluster header {header:?}, expected \"Cluster ID:<id>\"")]
    MalformedHeader { header: String },

    #[error("vertex {vertex} is outside the declared range 0..{vertex_count}")]
    VertexOutOfRange { vertex: u32, vertex_count: usize },
}

impl QualityError {
    /// Attach file and line context to a record-level failure
    pub fn record(path: impl Into<PathBuf>, line: usize, source: RecordError) -> Self {
        QualityError::Record {
            path: path.into(),
            line,
            source,
        }
    }
}
