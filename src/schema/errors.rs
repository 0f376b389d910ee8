//! Validation error types
//!
//! A failed validation carries one [`ValidationDetails`] entry per failing
//! field, never just the first.

use std::fmt;

/// Validation failure details for a single field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDetails {
    /// Field path (e.g., "rollNo", "skills[2]")
    pub field: String,
    /// Expected type or condition
    pub expected: String,
    /// Actual value or type found
    pub actual: String,
}

impl ValidationDetails {
    pub fn new(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::new(field, "a non-empty value", "missing")
    }

    pub fn empty_value(field: impl Into<String>) -> Self {
        Self::new(field, "a non-empty value", "empty text")
    }

    pub fn type_mismatch(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::new(field, expected, actual)
    }

    /// Value outside an enumerated set; `allowed` is rendered in order
    pub fn not_in_enum(field: impl Into<String>, allowed: &[&str], actual: impl fmt::Display) -> Self {
        Self::new(
            field,
            format!("one of {}", allowed.join(", ")),
            actual.to_string(),
        )
    }
}

impl fmt::Display for ValidationDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: expected {}, got {}", self.field, self.expected, self.actual)
    }
}

/// A rejected student document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    details: Vec<ValidationDetails>,
}

impl ValidationError {
    pub fn new(details: Vec<ValidationDetails>) -> Self {
        Self { details }
    }

    pub fn single(details: ValidationDetails) -> Self {
        Self::new(vec![details])
    }

    pub fn details(&self) -> &[ValidationDetails] {
        &self.details
    }

    /// Returns true if any failure concerns `field`
    pub fn has_field(&self, field: &str) -> bool {
        self.details.iter().any(|d| d.field == field)
    }

    /// Rendered per-field messages, in field order
    pub fn messages(&self) -> Vec<String> {
        self.details.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "student validation failed: {}", self.messages().join("; "))
    }
}

impl std::error::Error for ValidationError {}

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_display() {
        let details = ValidationDetails::not_in_enum("gender", &["Male", "Female"], "\"Other\"");
        assert_eq!(
            details.to_string(),
            "gender: expected one of Male, Female, got \"Other\""
        );
    }

    #[test]
    fn test_error_lists_every_field() {
        let err = ValidationError::new(vec![
            ValidationDetails::missing_field("name"),
            ValidationDetails::empty_value("rollNo"),
        ]);

        assert!(err.has_field("name"));
        assert!(err.has_field("rollNo"));
        assert!(!err.has_field("gender"));
        assert_eq!(err.messages().len(), 2);
        assert!(err.to_string().contains("name: expected a non-empty value, got missing"));
    }
}
