//! File-backed record store
//!
//! Records live in an append-only, checksummed file and are cached in
//! memory after open. Opening verifies every record; inserts are durable
//! before they are returned.

use std::path::Path;
use std::sync::Mutex;

use tracing::{debug, info};
use uuid::Uuid;

use super::errors::{StoreError, StoreResult};
use super::reader::RecordReader;
use super::record::StoredRecord;
use super::store::{next_created_at, sort_newest_first, RecordStore};
use super::writer::RecordWriter;
use crate::schema::{validate_student, NewStudent, StudentRecord};

struct FileState {
    writer: RecordWriter,
    /// Insertion order, which is also ascending `created_at`
    records: Vec<StudentRecord>,
}

pub struct FileStore {
    state: Mutex<FileState>,
}

impl FileStore {
    /// Opens the store under `data_dir`, creating it if absent.
    ///
    /// # Errors
    ///
    /// `StoreError::Io` if the directory or file cannot be opened, and
    /// `StoreError::Corruption` if any existing record fails verification.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        let writer = RecordWriter::open(data_dir)?;

        let mut records = Vec::new();
        let mut reader = RecordReader::open(writer.path())?;
        for (offset, stored) in reader.read_all()? {
            records.push(stored.into_student(offset)?);
        }
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        info!(
            path = %writer.path().display(),
            records = records.len(),
            "record file opened"
        );

        Ok(Self {
            state: Mutex::new(FileState { writer, records }),
        })
    }
}

impl RecordStore for FileStore {
    fn insert_one(&self, student: NewStudent) -> StoreResult<StudentRecord> {
        validate_student(&student)?;

        let mut state = self.state.lock().map_err(|_| StoreError::Poisoned)?;
        let last = state.records.last().map(|r| r.created_at);

        let record = StudentRecord {
            id: Uuid::new_v4().to_string(),
            student,
            created_at: next_created_at(last),
        };

        let offset = state.writer.append(&StoredRecord::from_student(&record)?)?;
        debug!(id = %record.id, offset, "student appended");

        state.records.push(record.clone());
        Ok(record)
    }

    fn find_all_sorted_desc(&self) -> StoreResult<Vec<StudentRecord>> {
        let mut records = self
            .state
            .lock()
            .map_err(|_| StoreError::Poisoned)?
            .records
            .clone();
        sort_newest_first(&mut records);
        Ok(records)
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self
            .state
            .lock()
            .map_err(|_| StoreError::Poisoned)?
            .records
            .len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Department, Gender, Section};
    use tempfile::TempDir;

    #[test]
    fn test_insert_and_list() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        let student = NewStudent::new("Priya", "21CS031", Gender::Female)
            .with_department(Department::Cse)
            .with_section(Section::new(1).unwrap())
            .with_skills(["Java"]);
        let saved = store.insert_one(student.clone()).unwrap();

        assert_eq!(saved.student, student);
        assert_eq!(store.find_all_sorted_desc().unwrap(), vec![saved]);
    }

    #[test]
    fn test_records_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let saved = {
            let store = FileStore::open(dir.path()).unwrap();
            store
                .insert_one(NewStudent::new("A", "1", Gender::Male))
                .unwrap();
            store
                .insert_one(NewStudent::new("B", "2", Gender::Female))
                .unwrap();
            store.find_all_sorted_desc().unwrap()
        };

        let reopened = FileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.find_all_sorted_desc().unwrap(), saved);

        let third = reopened
            .insert_one(NewStudent::new("C", "3", Gender::Male))
            .unwrap();
        assert!(third.created_at > saved[0].created_at);
    }

    #[test]
    fn test_validation_failure_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();

        let err = store
            .insert_one(NewStudent::new("A", "", Gender::Male))
            .unwrap_err();
        assert!(err.is_validation());

        let len = std::fs::metadata(dir.path().join(crate::storage::RECORD_FILE))
            .unwrap()
            .len();
        assert_eq!(len, 0);
    }
}
