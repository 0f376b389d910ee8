//! Record store error types

use std::io;

use thiserror::Error;

use crate::schema::ValidationError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Document rejected by the schema; reported to clients like any
    /// other validation failure
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Disk I/O failure
    #[error("{message}: {source}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
    },

    /// Checksum mismatch, truncation or undecodable record (fatal at open)
    #[error("data corruption at byte offset {offset}: {reason}")]
    Corruption { offset: u64, reason: String },

    /// Document body could not be encoded
    #[error("failed to encode document: {0}")]
    Encoding(#[from] serde_json::Error),

    /// Store address with an unknown scheme
    #[error("unsupported store address '{0}' (expected memory://, file://<dir> or a directory path)")]
    UnsupportedAddress(String),

    /// A failed append could not be rolled back; the file tail is unknown
    /// and no further appends are accepted until the store is reopened
    #[error("record file {0} left in an unknown state by a failed append")]
    WriterFailed(String),

    /// A writer panicked while holding the store lock
    #[error("record store lock poisoned")]
    Poisoned,
}

impl StoreError {
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        StoreError::Io {
            message: message.into(),
            source,
        }
    }

    pub fn corruption(offset: u64, reason: impl Into<String>) -> Self {
        StoreError::Corruption {
            offset,
            reason: reason.into(),
        }
    }

    /// Returns whether this is a client-caused rejection
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }
}
