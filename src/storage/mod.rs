//! Record store for student documents
//!
//! [`RecordStore`] is the contract the HTTP layer depends on. Two
//! implementations are provided:
//!
//! - [`MemoryStore`]: process-local, for tests and throwaway runs
//! - [`FileStore`]: append-only record file, CRC32-checked on every read,
//!   fsynced on every insert. A corrupt file fails at open.

mod errors;
mod file;
mod memory;
mod reader;
mod record;
mod store;
mod writer;

pub use errors::{StoreError, StoreResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use record::StoredRecord;
pub use store::{open_store, RecordStore, StoreAddress};
pub use writer::RECORD_FILE;
