//! Person domain types and the request shape for create/update

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::input::{null_as_default, MapTo, MappingError, Validate};
use super::ValidationError;

/// Role of a person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonType {
    Student,
    Professor,
}

impl PersonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Professor => "professor",
        }
    }
}

impl fmt::Display for PersonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown person type string
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown person type '{0}'")]
pub struct UnknownPersonType(pub String);

impl FromStr for PersonType {
    type Err = UnknownPersonType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Self::Student),
            "professor" => Ok(Self::Professor),
            other => Err(UnknownPersonType(other.to_owned())),
        }
    }
}

/// Person record with its enrollment set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    #[serde(rename = "type")]
    pub kind: PersonType,
    pub age: i32,
    /// Enrolled course ids, ascending
    pub courses: Vec<i32>,
}

/// Person fields supplied by a caller (create or full replace)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    pub first_name: String,
    pub last_name: String,
    pub kind: PersonType,
    pub age: i32,
    /// Enrollment set, ascending and without duplicates
    pub courses: Vec<i32>,
}

impl NewPerson {
    /// Build a person, normalizing the enrollment set.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        kind: PersonType,
        age: i32,
        courses: impl IntoIterator<Item = i32>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            kind,
            age,
            courses: normalize_courses(courses),
        }
    }

    pub fn into_person(self, id: i32) -> Person {
        Person {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            kind: self.kind,
            age: self.age,
            courses: self.courses,
        }
    }
}

/// Sort course ids ascending and drop duplicates.
pub fn normalize_courses(courses: impl IntoIterator<Item = i32>) -> Vec<i32> {
    let mut ids: Vec<i32> = courses.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Body of POST /api/person and PUT /api/person/{firstName}
///
/// Missing and `null` fields decode to their zero value so that validation
/// can report them instead of failing the whole decode.
#[derive(Debug, Deserialize)]
pub struct PersonInput {
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub age: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub courses: Vec<i32>,
}

impl Validate for PersonInput {
    fn validate(&self) -> Vec<ValidationError> {
        let mut problems = Vec::new();

        if self.first_name.is_empty() {
            problems.push(ValidationError::Empty { field: "first_name" });
        }
        if self.last_name.is_empty() {
            problems.push(ValidationError::Empty { field: "last_name" });
        }
        if self.kind.parse::<PersonType>().is_err() {
            problems.push(ValidationError::InvalidVariant {
                field: "type",
                expected: "student or professor",
            });
        }
        if self.age <= 0 {
            problems.push(ValidationError::NotPositive { field: "age" });
        }

        problems
    }
}

impl MapTo<NewPerson> for PersonInput {
    fn map_to(self) -> Result<NewPerson, MappingError> {
        let kind = self.kind.parse::<PersonType>().map_err(|e| MappingError {
            field: "type",
            reason: e.to_string(),
        })?;
        let age = i32::try_from(self.age).map_err(|e| MappingError {
            field: "age",
            reason: e.to_string(),
        })?;

        Ok(NewPerson::new(
            self.first_name,
            self.last_name,
            kind,
            age,
            self.courses,
        ))
    }
}
