//! Validation Invariant Tests
//!
//! - Validation is deterministic
//! - Every failing field is reported, not just the first
//! - Valid payloads map field-for-field onto the stored student
//! - Rejected payloads never reach the store

use rollbook::schema::{validate_payload, Department, Gender};
use rollbook::storage::{MemoryStore, RecordStore};
use serde_json::{json, Value};

// =============================================================================
// Helper Functions
// =============================================================================

fn base() -> Value {
    json!({ "name": "Nila", "rollNo": "22AD005", "gender": "Female" })
}

fn with(field: &str, value: Value) -> Value {
    let mut doc = base();
    doc[field] = value;
    doc
}

fn without(field: &str) -> Value {
    let mut doc = base();
    doc.as_object_mut().unwrap().remove(field);
    doc
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_validation_is_deterministic() {
    let bad = json!({ "gender": "X", "section": "nine", "skills": [1, 2] });
    let first = validate_payload(&bad).unwrap_err();

    for _ in 0..50 {
        assert_eq!(validate_payload(&bad).unwrap_err(), first);
    }
}

#[test]
fn test_failures_reported_in_field_order() {
    let bad = json!({ "gender": "X", "department": "ECE", "section": 9, "skills": { "C": 1 } });
    let err = validate_payload(&bad).unwrap_err();

    let fields: Vec<&str> = err.details().iter().map(|d| d.field.as_str()).collect();
    assert_eq!(
        fields,
        vec!["name", "rollNo", "gender", "department", "section", "skills"]
    );
}

// =============================================================================
// Valid Payload Space
// =============================================================================

#[test]
fn test_all_valid_combinations_accepted() {
    let genders = ["Male", "Female"];
    let departments = [None, Some(""), Some("IT"), Some("CSE"), Some("AIDS"), Some("CET")];
    let sections = [None, Some(1), Some(2), Some(3)];

    for gender in genders {
        for department in departments {
            for section in sections {
                let mut doc = with("gender", json!(gender));
                if let Some(d) = department {
                    doc["department"] = json!(d);
                }
                if let Some(s) = section {
                    doc["section"] = json!(s);
                }
                doc["skills"] = json!(["C", "Ruby"]);

                let student = validate_payload(&doc)
                    .unwrap_or_else(|e| panic!("{} rejected: {}", doc, e));

                assert_eq!(student.gender.as_str(), gender);
                assert_eq!(
                    student.department.map(|d| d.as_str()),
                    department.filter(|d| !d.is_empty())
                );
                assert_eq!(student.section.map(|s| s.get() as i32), section);
                assert_eq!(student.skills, vec!["C", "Ruby"]);
            }
        }
    }
}

#[test]
fn test_department_values_map_to_enum() {
    let student = validate_payload(&with("department", json!("CET"))).unwrap();
    assert_eq!(student.department, Some(Department::Cet));
    assert_eq!(student.gender, Gender::Female);
}

// =============================================================================
// Rejections
// =============================================================================

#[test]
fn test_each_required_field_enforced() {
    for field in ["name", "rollNo", "gender"] {
        let err = validate_payload(&without(field)).unwrap_err();
        assert!(err.has_field(field), "{} not reported", field);
        assert_eq!(err.details().len(), 1);

        let err = validate_payload(&with(field, json!(""))).unwrap_err();
        assert!(err.has_field(field));
    }
}

#[test]
fn test_structured_name_rejected() {
    let err = validate_payload(&with("name", json!({ "first": "Nila" }))).unwrap_err();
    assert_eq!(err.details()[0].expected, "text");
    assert_eq!(err.details()[0].actual, "object");
}

#[test]
fn test_scalars_cast_to_text() {
    let mut doc = with("rollNo", json!(2205));
    doc["skills"] = json!(["JS", 101, false]);

    let student = validate_payload(&doc).unwrap();
    assert_eq!(student.roll_no, "2205");
    assert_eq!(student.skills, vec!["JS", "101", "false"]);
}

#[test]
fn test_rejected_payloads_insert_nothing() {
    let store = MemoryStore::new();
    let payloads = [
        without("name"),
        without("rollNo"),
        without("gender"),
        with("gender", json!("Other")),
        with("section", json!(4)),
        with("department", json!("Arts")),
    ];

    for payload in payloads {
        if let Ok(student) = validate_payload(&payload) {
            store.insert_one(student).unwrap();
        }
    }

    assert_eq!(store.len().unwrap(), 0);
}
