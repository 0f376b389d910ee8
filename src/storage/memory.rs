//! In-memory record store

use std::sync::Mutex;

use uuid::Uuid;

use super::errors::{StoreError, StoreResult};
use super::store::{next_created_at, sort_newest_first, RecordStore};
use crate::schema::{validate_student, NewStudent, StudentRecord};

/// Process-local store. Contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<StudentRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn insert_one(&self, student: NewStudent) -> StoreResult<StudentRecord> {
        validate_student(&student)?;

        let mut records = self.records.lock().map_err(|_| StoreError::Poisoned)?;
        let last = records.last().map(|r| r.created_at);

        let record = StudentRecord {
            id: Uuid::new_v4().to_string(),
            student,
            created_at: next_created_at(last),
        };
        records.push(record.clone());

        Ok(record)
    }

    fn find_all_sorted_desc(&self) -> StoreResult<Vec<StudentRecord>> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| StoreError::Poisoned)?
            .clone();
        sort_newest_first(&mut records);
        Ok(records)
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.records.lock().map_err(|_| StoreError::Poisoned)?.len())
    }
}
