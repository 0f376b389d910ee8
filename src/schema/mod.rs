//! Student schema
//!
//! Types for the single domain entity and the validation rules applied to
//! it before it reaches the record store.

mod errors;
mod types;
mod validator;

pub use errors::{ValidationDetails, ValidationError, ValidationResult};
pub use types::{Department, Gender, NewStudent, Section, StudentRecord};
pub use validator::{validate_payload, validate_student};
