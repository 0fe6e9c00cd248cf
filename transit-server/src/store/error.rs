//! Store error types.

use std::fmt;

use crate::domain::DomainError;

/// The kind of record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Stop,
    Route,
    Trip,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecordKind::Stop => "stop",
            RecordKind::Route => "route",
            RecordKind::Trip => "trip",
        })
    }
}

/// Errors that can occur when reading or changing the record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No record with this id
    #[error("{kind} {id} not found")]
    NotFound { kind: RecordKind, id: i64 },

    /// A record with this id already exists
    #[error("{kind} {id} already exists")]
    Duplicate { kind: RecordKind, id: i64 },

    /// Record failed validation
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Snapshot file could not be read or written
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot file is not valid JSON for the expected shape
    #[error("snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn not_found(kind: RecordKind, id: impl Into<i64>) -> Self {
        StoreError::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub(crate) fn duplicate(kind: RecordKind, id: impl Into<i64>) -> Self {
        StoreError::Duplicate {
            kind,
            id: id.into(),
        }
    }
}
