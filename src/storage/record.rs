//! On-disk student record format
//!
//! ```text
//! +------------------+
//! | Record Length    | (u32 LE, includes itself and the checksum)
//! +------------------+
//! | Student ID       | (length-prefixed UTF-8)
//! +------------------+
//! | Created At       | (i64 LE, Unix milliseconds)
//! +------------------+
//! | Document Body    | (length-prefixed JSON)
//! +------------------+
//! | Checksum         | (u32 LE, CRC32)
//! +------------------+
//! ```
//!
//! The checksum covers every byte before it, including the length prefix.

use std::io::{self, Read};

use chrono::DateTime;
use crc32fast::Hasher;

use super::errors::{StoreError, StoreResult};
use crate::schema::{NewStudent, StudentRecord};

/// len + id len + created_at + body len + checksum
pub(crate) const MIN_RECORD_SIZE: usize = 4 + 4 + 8 + 4 + 4;

/// CRC32 (IEEE) over `data`.
pub(crate) fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// A student record in its stored form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    pub id: String,
    pub created_at_ms: i64,
    /// JSON encoding of the [`NewStudent`] fields
    pub body: Vec<u8>,
}

impl StoredRecord {
    pub fn from_student(record: &StudentRecord) -> StoreResult<Self> {
        Ok(Self {
            id: record.id.clone(),
            created_at_ms: record.created_at.timestamp_millis(),
            body: serde_json::to_vec(&record.student)?,
        })
    }

    /// Decodes the body back into a student record.
    ///
    /// `offset` is only used to locate the record in corruption reports.
    pub fn into_student(self, offset: u64) -> StoreResult<StudentRecord> {
        let created_at = DateTime::from_timestamp_millis(self.created_at_ms).ok_or_else(|| {
            StoreError::corruption(
                offset,
                format!("created_at {} out of range", self.created_at_ms),
            )
        })?;

        let student: NewStudent = serde_json::from_slice(&self.body).map_err(|e| {
            StoreError::corruption(offset, format!("undecodable student body: {}", e))
        })?;

        Ok(StudentRecord {
            id: self.id,
            student,
            created_at,
        })
    }

    fn serialize_body(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(4 + self.id.len() + 8 + 4 + self.body.len());

        buf.extend_from_slice(&(self.id.len() as u32).to_le_bytes());
        buf.extend_from_slice(self.id.as_bytes());

        buf.extend_from_slice(&self.created_at_ms.to_le_bytes());

        buf.extend_from_slice(&(self.body.len() as u32).to_le_bytes());
        buf.extend_from_slice(&self.body);

        buf
    }

    /// Serializes the complete record: length, body, checksum.
    pub fn serialize(&self) -> Vec<u8> {
        let body = self.serialize_body();
        let record_length = (4 + body.len() + 4) as u32;

        let mut record = Vec::with_capacity(record_length as usize);
        record.extend_from_slice(&record_length.to_le_bytes());
        record.extend_from_slice(&body);

        let checksum = compute_checksum(&record);
        record.extend_from_slice(&checksum.to_le_bytes());

        record
    }

    /// Deserializes one record from the front of `data`, verifying its
    /// checksum. Returns the record and the number of bytes consumed.
    pub fn deserialize(data: &[u8]) -> io::Result<(Self, usize)> {
        if data.len() < MIN_RECORD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "Record too short",
            ));
        }

        let record_length = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;

        if record_length < MIN_RECORD_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid record length: {}", record_length),
            ));
        }

        if data.len() < record_length {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "Record truncated: expected {} bytes, got {}",
                    record_length,
                    data.len()
                ),
            ));
        }

        let checksum_offset = record_length - 4;
        let stored_checksum = u32::from_le_bytes([
            data[checksum_offset],
            data[checksum_offset + 1],
            data[checksum_offset + 2],
            data[checksum_offset + 3],
        ]);
        let computed_checksum = compute_checksum(&data[..checksum_offset]);

        if computed_checksum != stored_checksum {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Checksum mismatch: computed {:08x}, stored {:08x}",
                    computed_checksum, stored_checksum
                ),
            ));
        }

        let mut cursor = io::Cursor::new(&data[4..checksum_offset]);

        let id_bytes = read_prefixed(&mut cursor)?;
        let id = String::from_utf8(id_bytes).map_err(|e| {
            io::Error::new(io::ErrorKind::InvalidData, format!("Invalid UTF-8: {}", e))
        })?;

        let mut ts_buf = [0u8; 8];
        cursor.read_exact(&mut ts_buf)?;
        let created_at_ms = i64::from_le_bytes(ts_buf);

        let body = read_prefixed(&mut cursor)?;

        Ok((
            Self {
                id,
                created_at_ms,
                body,
            },
            record_length,
        ))
    }
}

fn read_prefixed<R: Read>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf)?;
    let len = u32::from_le_bytes(len_buf) as usize;

    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;
    Ok(buf)
}
