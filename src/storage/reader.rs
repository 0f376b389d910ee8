//! Sequential reader for the student record file
//!
//! Every record is checksum-verified as it is read. Any truncation or
//! mismatch is reported as corruption with its byte offset.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::errors::{StoreError, StoreResult};
use super::record::{StoredRecord, MIN_RECORD_SIZE};

pub struct RecordReader {
    reader: BufReader<File>,
    current_offset: u64,
    file_size: u64,
}

impl RecordReader {
    /// Opens the record file for reading.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let file = File::open(path).map_err(|e| {
            StoreError::io(format!("Failed to open record file {}", path.display()), e)
        })?;

        let file_size = file
            .metadata()
            .map_err(|e| StoreError::io("Failed to read record file metadata", e))?
            .len();

        Ok(Self {
            reader: BufReader::new(file),
            current_offset: 0,
            file_size,
        })
    }

    /// Reads the next record.
    ///
    /// Returns `Ok(None)` at end of file.
    pub fn read_next(&mut self) -> StoreResult<Option<StoredRecord>> {
        if self.current_offset >= self.file_size {
            return Ok(None);
        }

        let remaining = self.file_size - self.current_offset;
        if remaining < MIN_RECORD_SIZE as u64 {
            return Err(StoreError::corruption(
                self.current_offset,
                format!(
                    "Truncated record file: {} bytes remaining, minimum record size is {}",
                    remaining, MIN_RECORD_SIZE
                ),
            ));
        }

        let mut len_buf = [0u8; 4];
        self.reader.read_exact(&mut len_buf).map_err(|e| {
            StoreError::corruption(
                self.current_offset,
                format!("Failed to read record length: {}", e),
            )
        })?;
        let record_length = u32::from_le_bytes(len_buf) as u64;

        if record_length < MIN_RECORD_SIZE as u64 || record_length > remaining {
            return Err(StoreError::corruption(
                self.current_offset,
                format!(
                    "Invalid record length {} ({} bytes remaining)",
                    record_length, remaining
                ),
            ));
        }

        let mut record_buf = vec![0u8; record_length as usize];
        record_buf[..4].copy_from_slice(&len_buf);
        self.reader.read_exact(&mut record_buf[4..]).map_err(|e| {
            StoreError::corruption(
                self.current_offset,
                format!("Failed to read record body: {}", e),
            )
        })?;

        let (record, consumed) = StoredRecord::deserialize(&record_buf)
            .map_err(|e| StoreError::corruption(self.current_offset, e.to_string()))?;

        self.current_offset += consumed as u64;
        Ok(Some(record))
    }

    /// Reads every remaining record, paired with its byte offset.
    pub fn read_all(&mut self) -> StoreResult<Vec<(u64, StoredRecord)>> {
        let mut records = Vec::new();
        loop {
            let offset = self.current_offset;
            match self.read_next()? {
                Some(record) => records.push((offset, record)),
                None => break,
            }
        }
        Ok(records)
    }
}
