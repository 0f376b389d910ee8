//! Student record types
//!
//! JSON keys follow the client form: `rollNo`, `createdAt`, and the
//! store-assigned identifier under `_id`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Gender as accepted by the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    /// Exact, case-sensitive match against the enumerated values
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.as_str() == value)
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Department codes offered by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Department {
    #[serde(rename = "IT")]
    It,
    #[serde(rename = "CSE")]
    Cse,
    #[serde(rename = "AIDS")]
    Aids,
    #[serde(rename = "CET")]
    Cet,
}

impl Department {
    pub const ALL: [Department; 4] = [
        Department::It,
        Department::Cse,
        Department::Aids,
        Department::Cet,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::It => "IT",
            Department::Cse => "CSE",
            Department::Aids => "AIDS",
            Department::Cet => "CET",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.as_str() == value)
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Class section, restricted to 1, 2 or 3
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Section(u8);

impl Section {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 3;

    pub fn new(value: i64) -> Option<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Section {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Section::new(value).ok_or_else(|| format!("section {} is not one of 1, 2, 3", value))
    }
}

impl From<Section> for i64 {
    fn from(section: Section) -> Self {
        section.0 as i64
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated student awaiting insertion.
///
/// Produced by [`validate_payload`](super::validate_payload); the store
/// assigns the identifier and creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub name: String,
    pub roll_no: String,
    pub gender: Gender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<Department>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<Section>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl NewStudent {
    /// Student with only the required fields set
    pub fn new(name: impl Into<String>, roll_no: impl Into<String>, gender: Gender) -> Self {
        Self {
            name: name.into(),
            roll_no: roll_no.into(),
            gender,
            department: None,
            section: None,
            skills: Vec::new(),
        }
    }

    pub fn with_department(mut self, department: Department) -> Self {
        self.department = Some(department);
        self
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.section = Some(section);
        self
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }
}

/// A persisted student as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub student: NewStudent,
    pub created_at: DateTime<Utc>,
}
