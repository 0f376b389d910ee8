//! Append-only writer for the student record file
//!
//! Each append is followed by fsync; a record is not acknowledged until it
//! is durable. A failed append truncates the file back to its previous
//! length so no partial record is left behind. If that truncate also
//! fails, the writer refuses every later append.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::error;

use super::errors::{StoreError, StoreResult};
use super::record::StoredRecord;

/// Name of the record file inside the data directory
pub const RECORD_FILE: &str = "students.dat";

pub struct RecordWriter {
    path: PathBuf,
    file: File,
    current_offset: u64,
    /// Set when a rollback failed and the file tail no longer matches
    /// `current_offset`
    failed: bool,
}

impl RecordWriter {
    /// Opens or creates `<data_dir>/students.dat`, creating the directory
    /// if needed.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        if !data_dir.exists() {
            fs::create_dir_all(data_dir).map_err(|e| {
                StoreError::io(
                    format!("Failed to create data directory {}", data_dir.display()),
                    e,
                )
            })?;
        }

        let path = data_dir.join(RECORD_FILE);
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                StoreError::io(format!("Failed to open record file {}", path.display()), e)
            })?;

        let current_offset = file
            .metadata()
            .map_err(|e| StoreError::io("Failed to read record file metadata", e))?
            .len();

        Ok(Self {
            path,
            file,
            current_offset,
            failed: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn current_offset(&self) -> u64 {
        self.current_offset
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Appends a record and fsyncs. Returns the offset it was written at.
    pub fn append(&mut self, record: &StoredRecord) -> StoreResult<u64> {
        if self.failed {
            return Err(StoreError::WriterFailed(self.path.display().to_string()));
        }

        let bytes = record.serialize();
        let offset = self.current_offset;

        let written = self
            .file
            .write_all(&bytes)
            .and_then(|()| self.file.sync_all());

        if let Err(e) = written {
            if let Err(rollback) = self.file.set_len(offset) {
                error!(
                    path = %self.path.display(),
                    offset,
                    error = %rollback,
                    "record file rollback failed, refusing further appends"
                );
                self.failed = true;
            }
            return Err(StoreError::io(
                format!("Failed to append student {}", record.id),
                e,
            ));
        }

        self.current_offset += bytes.len() as u64;
        Ok(offset)
    }
}
