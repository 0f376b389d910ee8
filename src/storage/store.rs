//! Record store contract and address resolution

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use super::errors::{StoreError, StoreResult};
use super::file::FileStore;
use super::memory::MemoryStore;
use crate::schema::{NewStudent, StudentRecord};

/// Persistence contract for student records.
///
/// Implementations assign `_id` and `createdAt` on insert and must reject
/// documents that fail [`validate_student`](crate::schema::validate_student)
/// with [`StoreError::Validation`].
pub trait RecordStore: Send + Sync {
    /// Inserts one student atomically and returns the stored record.
    fn insert_one(&self, student: NewStudent) -> StoreResult<StudentRecord>;

    /// Returns all records, newest `createdAt` first.
    fn find_all_sorted_desc(&self) -> StoreResult<Vec<StudentRecord>>;

    fn len(&self) -> StoreResult<usize>;

    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

/// Where the record store lives.
///
/// - `memory://` keeps records in process memory
/// - `file://<dir>` or a bare path stores them under that directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreAddress {
    Memory,
    File(PathBuf),
}

impl StoreAddress {
    pub fn parse(address: &str) -> StoreResult<Self> {
        let address = address.trim();

        if address == "memory://" || address == "memory" {
            return Ok(StoreAddress::Memory);
        }
        if let Some(path) = address.strip_prefix("file://") {
            if path.is_empty() {
                return Err(StoreError::UnsupportedAddress(address.to_string()));
            }
            return Ok(StoreAddress::File(PathBuf::from(path)));
        }
        if address.is_empty() || address.contains("://") {
            return Err(StoreError::UnsupportedAddress(address.to_string()));
        }

        Ok(StoreAddress::File(PathBuf::from(address)))
    }
}

impl fmt::Display for StoreAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreAddress::Memory => write!(f, "memory://"),
            StoreAddress::File(path) => write!(f, "file://{}", path.display()),
        }
    }
}

/// Connects to the store at `address`.
///
/// For a file store this reads and verifies every existing record; a
/// corrupt file fails here, before anything is served.
pub fn open_store(address: &StoreAddress) -> StoreResult<Arc<dyn RecordStore>> {
    match address {
        StoreAddress::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreAddress::File(dir) => Ok(Arc::new(FileStore::open(dir)?)),
    }
}

/// Next creation timestamp: now at millisecond precision, bumped past
/// `last` so timestamps strictly increase in insertion order.
pub(crate) fn next_created_at(last: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now();
    let now = DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now);

    match last {
        Some(last) if now <= last => last + Duration::milliseconds(1),
        _ => now,
    }
}

/// Orders records newest first.
pub(crate) fn sort_newest_first(records: &mut [StudentRecord]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
