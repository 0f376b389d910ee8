//! rollbook - student registration service
//!
//! A browser form posts student records to a small JSON API, which
//! validates them and persists them to a checksummed record store.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod schema;
pub mod storage;
