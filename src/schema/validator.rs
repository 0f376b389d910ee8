//! Student document validation
//!
//! Shared by the API (request bodies) and the record store (insert-time
//! re-check). Every field is checked and all failures are reported together.
//!
//! Field rules:
//! - `name`, `rollNo`: required non-empty text; numbers and booleans are
//!   cast to their text form
//! - `gender`: required, `Male` or `Female`
//! - `department`: absent, null or `""` means none; otherwise IT, CSE, AIDS or CET
//! - `section`: absent, null or `""` means none; otherwise 1, 2 or 3. Numeric
//!   strings and whole floats are cast, since form selects submit text.
//! - `skills`: absent or null means empty; a lone scalar becomes a one-item
//!   list; items are cast to text the same way, arrays and objects fail
//!
//! Unknown keys, `_id` and `createdAt` are ignored.

use serde_json::{Map, Value};

use super::errors::{ValidationDetails, ValidationError, ValidationResult};
use super::types::{Department, Gender, NewStudent, Section};

const GENDERS: [&str; 2] = ["Male", "Female"];
const DEPARTMENTS: [&str; 4] = ["IT", "CSE", "AIDS", "CET"];
const SECTIONS: [&str; 3] = ["1", "2", "3"];

/// Validates an untrusted JSON body and builds the student to insert.
pub fn validate_payload(payload: &Value) -> ValidationResult<NewStudent> {
    let obj = payload.as_object().ok_or_else(|| {
        ValidationError::single(ValidationDetails::type_mismatch(
            "$root",
            "object",
            json_type_name(payload),
        ))
    })?;

    let mut failures = Vec::new();

    let name = required_text(obj, "name", &mut failures);
    let roll_no = required_text(obj, "rollNo", &mut failures);
    let gender = required_gender(obj, &mut failures);
    let department = optional_department(obj, &mut failures);
    let section = optional_section(obj, &mut failures);
    let skills = skills(obj, &mut failures);

    match (name, roll_no, gender) {
        (Some(name), Some(roll_no), Some(gender)) if failures.is_empty() => Ok(NewStudent {
            name,
            roll_no,
            gender,
            department,
            section,
            skills,
        }),
        _ => Err(ValidationError::new(failures)),
    }
}

/// Re-checks a typed student before it is written.
///
/// Enumerated fields are enforced by their types; this covers the text
/// constraints a caller could still violate when building `NewStudent`
/// directly.
pub fn validate_student(student: &NewStudent) -> ValidationResult<()> {
    let mut failures = Vec::new();

    if student.name.is_empty() {
        failures.push(ValidationDetails::empty_value("name"));
    }
    if student.roll_no.is_empty() {
        failures.push(ValidationDetails::empty_value("rollNo"));
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(failures))
    }
}

fn required_text(
    obj: &Map<String, Value>,
    field: &str,
    failures: &mut Vec<ValidationDetails>,
) -> Option<String> {
    match obj.get(field) {
        None | Some(Value::Null) => {
            failures.push(ValidationDetails::missing_field(field));
            None
        }
        Some(Value::String(s)) if s.is_empty() => {
            failures.push(ValidationDetails::empty_value(field));
            None
        }
        Some(value) => {
            let text = scalar_text(value);
            if text.is_none() {
                failures.push(ValidationDetails::type_mismatch(
                    field,
                    "text",
                    json_type_name(value),
                ));
            }
            text
        }
    }
}

/// Text form of a scalar; `None` for null, arrays and objects.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn required_gender(
    obj: &Map<String, Value>,
    failures: &mut Vec<ValidationDetails>,
) -> Option<Gender> {
    let value = required_text(obj, "gender", failures)?;
    let gender = Gender::parse(&value);
    if gender.is_none() {
        failures.push(ValidationDetails::not_in_enum(
            "gender",
            &GENDERS,
            format!("{:?}", value),
        ));
    }
    gender
}

fn optional_department(
    obj: &Map<String, Value>,
    failures: &mut Vec<ValidationDetails>,
) -> Option<Department> {
    match obj.get("department") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => {
            let department = Department::parse(s);
            if department.is_none() {
                failures.push(ValidationDetails::not_in_enum(
                    "department",
                    &DEPARTMENTS,
                    format!("{:?}", s),
                ));
            }
            department
        }
        Some(other) => {
            failures.push(ValidationDetails::type_mismatch(
                "department",
                "text",
                json_type_name(other),
            ));
            None
        }
    }
}

fn optional_section(
    obj: &Map<String, Value>,
    failures: &mut Vec<ValidationDetails>,
) -> Option<Section> {
    let raw = match obj.get("section") {
        None | Some(Value::Null) => return None,
        Some(Value::String(s)) if s.is_empty() => return None,
        Some(raw) => raw,
    };

    let number = match raw {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    let section = number.and_then(Section::new);
    if section.is_none() {
        let actual = match raw {
            Value::Number(n) => n.to_string(),
            Value::String(s) => format!("{:?}", s),
            other => json_type_name(other).to_string(),
        };
        failures.push(ValidationDetails::not_in_enum("section", &SECTIONS, actual));
    }
    section
}

fn skills(obj: &Map<String, Value>, failures: &mut Vec<ValidationDetails>) -> Vec<String> {
    match obj.get("skills") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => {
            let mut skills = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                match scalar_text(item) {
                    Some(skill) => skills.push(skill),
                    None => failures.push(ValidationDetails::type_mismatch(
                        format!("skills[{}]", i),
                        "text",
                        json_type_name(item),
                    )),
                }
            }
            skills
        }
        Some(other) => match scalar_text(other) {
            Some(skill) => vec![skill],
            None => {
                failures.push(ValidationDetails::type_mismatch(
                    "skills",
                    "array of text",
                    json_type_name(other),
                ));
                Vec::new()
            }
        },
    }
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_i64() || n.is_u64() => "int",
        Value::Number(_) => "float",
        Value::String(_) => "text",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_payload() -> Value {
        json!({
            "name": "Asha",
            "rollNo": "21IT001",
            "gender": "Female",
            "department": "IT",
            "section": 2,
            "skills": ["C", "JS"]
        })
    }

    #[test]
    fn test_valid_payload_passes() {
        let student = validate_payload(&valid_payload()).unwrap();
        assert_eq!(student.name, "Asha");
        assert_eq!(student.roll_no, "21IT001");
        assert_eq!(student.gender, Gender::Female);
        assert_eq!(student.department, Some(Department::It));
        assert_eq!(student.section.map(|s| s.get()), Some(2));
        assert_eq!(student.skills, vec!["C", "JS"]);
    }

    #[test]
    fn test_required_fields_only() {
        let doc = json!({ "name": "Ravi", "rollNo": "7", "gender": "Male" });
        let student = validate_payload(&doc).unwrap();
        assert_eq!(student.department, None);
        assert_eq!(student.section, None);
        assert!(student.skills.is_empty());
    }

    #[test]
    fn test_every_failure_is_reported() {
        let doc = json!({ "gender": "Other", "section": 4 });
        let err = validate_payload(&doc).unwrap_err();

        assert!(err.has_field("name"));
        assert!(err.has_field("rollNo"));
        assert!(err.has_field("gender"));
        assert!(err.has_field("section"));
        assert_eq!(err.details().len(), 4);
    }

    #[test]
    fn test_empty_required_text_rejected() {
        let mut doc = valid_payload();
        doc["name"] = json!("");
        let err = validate_payload(&doc).unwrap_err();
        assert_eq!(err.details(), &[ValidationDetails::empty_value("name")]);
    }

    #[test]
    fn test_null_required_field_is_missing() {
        let mut doc = valid_payload();
        doc["rollNo"] = Value::Null;
        let err = validate_payload(&doc).unwrap_err();
        assert_eq!(err.details()[0].actual, "missing");
    }

    #[test]
    fn test_gender_is_case_sensitive() {
        let mut doc = valid_payload();
        doc["gender"] = json!("female");
        let err = validate_payload(&doc).unwrap_err();
        assert_eq!(err.details()[0].field, "gender");
        assert_eq!(err.details()[0].expected, "one of Male, Female");
    }

    #[test]
    fn test_empty_department_means_none() {
        let mut doc = valid_payload();
        doc["department"] = json!("");
        assert_eq!(validate_payload(&doc).unwrap().department, None);
    }

    #[test]
    fn test_unknown_department_rejected() {
        let mut doc = valid_payload();
        doc["department"] = json!("ECE");
        let err = validate_payload(&doc).unwrap_err();
        assert!(err.has_field("department"));
    }

    #[test]
    fn test_section_casts() {
        for (raw, expected) in [
            (json!(1), Some(1)),
            (json!("3"), Some(3)),
            (json!(2.0), Some(2)),
            (json!(""), None),
            (Value::Null, None),
        ] {
            let mut doc = valid_payload();
            doc["section"] = raw;
            let student = validate_payload(&doc).unwrap();
            assert_eq!(student.section.map(|s| s.get()), expected);
        }
    }

    #[test]
    fn test_invalid_sections_rejected() {
        for raw in [json!(4), json!(0), json!("abc"), json!(1.5), json!(true), json!([1])] {
            let mut doc = valid_payload();
            doc["section"] = raw;
            let err = validate_payload(&doc).unwrap_err();
            assert!(err.has_field("section"));
        }
    }

    #[test]
    fn test_skills_shapes() {
        let mut doc = valid_payload();
        doc["skills"] = json!("Ruby");
        assert_eq!(validate_payload(&doc).unwrap().skills, vec!["Ruby"]);

        doc["skills"] = json!(["C", ["C++"], "Java", null]);
        let err = validate_payload(&doc).unwrap_err();
        assert!(err.has_field("skills[1]"));
        assert!(err.has_field("skills[3]"));
        assert_eq!(err.details().len(), 2);

        doc["skills"] = json!({ "C": true });
        let err = validate_payload(&doc).unwrap_err();
        assert!(err.has_field("skills"));
    }

    #[test]
    fn test_scalar_text_fields_cast() {
        let doc = json!({ "name": "A", "rollNo": 2101, "gender": "Male" });
        assert_eq!(validate_payload(&doc).unwrap().roll_no, "2101");

        let doc = json!({ "name": true, "rollNo": 21.5, "gender": "Male" });
        let student = validate_payload(&doc).unwrap();
        assert_eq!(student.name, "true");
        assert_eq!(student.roll_no, "21.5");
    }

    #[test]
    fn test_structured_text_fields_rejected() {
        let doc = json!({ "name": ["A"], "rollNo": { "n": 1 }, "gender": "Male" });
        let err = validate_payload(&doc).unwrap_err();
        assert_eq!(
            err.messages(),
            vec![
                "name: expected text, got array",
                "rollNo: expected text, got object",
            ]
        );
    }

    #[test]
    fn test_skill_scalars_cast() {
        let mut doc = valid_payload();
        doc["skills"] = json!(["C", 3, true]);
        assert_eq!(validate_payload(&doc).unwrap().skills, vec!["C", "3", "true"]);

        doc["skills"] = json!(7);
        assert_eq!(validate_payload(&doc).unwrap().skills, vec!["7"]);
    }

    #[test]
    fn test_numeric_gender_fails_enum() {
        let mut doc = valid_payload();
        doc["gender"] = json!(1);
        let err = validate_payload(&doc).unwrap_err();
        assert_eq!(err.details()[0].expected, "one of Male, Female");
    }

    #[test]
    fn test_server_fields_ignored() {
        let mut doc = valid_payload();
        doc["_id"] = json!("client-chosen");
        doc["createdAt"] = json!("1999-01-01T00:00:00Z");
        doc["nickname"] = json!("ash");
        assert!(validate_payload(&doc).is_ok());
    }

    #[test]
    fn test_non_object_root_rejected() {
        let err = validate_payload(&json!(["name"])).unwrap_err();
        assert_eq!(err.details()[0].field, "$root");
        assert_eq!(err.details()[0].actual, "array");
    }

    #[test]
    fn test_validate_student_checks_text() {
        let ok = NewStudent::new("A", "1", Gender::Male);
        assert!(validate_student(&ok).is_ok());

        let bad = NewStudent::new("", "", Gender::Male);
        let err = validate_student(&bad).unwrap_err();
        assert_eq!(err.details().len(), 2);
    }
}
