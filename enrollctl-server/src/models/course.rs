//! Course domain type and its request shape

use serde::{Deserialize, Serialize};

use super::input::{null_as_default, MapTo, MappingError, Validate};
use super::ValidationError;

/// Course record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Course {
    pub id: i32,
    pub name: String,
}

/// Course fields supplied by a caller (create or rename)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    pub name: String,
}

/// `{"name": ...}` body of POST/PUT /api/course
#[derive(Debug, Deserialize)]
pub struct CourseInput {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

impl Validate for CourseInput {
    fn validate(&self) -> Vec<ValidationError> {
        let mut problems = Vec::new();
        if self.name.is_empty() {
            problems.push(ValidationError::Empty { field: "name" });
        }
        problems
    }
}

impl MapTo<NewCourse> for CourseInput {
    fn map_to(self) -> Result<NewCourse, MappingError> {
        Ok(NewCourse { name: self.name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{decode_validate, InputError};

    #[test]
    fn empty_name_is_single_problem() {
        let err = decode_validate::<CourseInput, NewCourse>(br#"{"name": ""}"#).unwrap_err();
        let InputError::Validation(problems) = err else {
            panic!("expected validation error");
        };
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].name, "name");
    }

    #[test]
    fn missing_name_is_validation_not_decode() {
        let err = decode_validate::<CourseInput, NewCourse>(b"{}").unwrap_err();
        assert!(matches!(err, InputError::Validation(_)));
    }

    #[test]
    fn null_name_is_validation_not_decode() {
        let err = decode_validate::<CourseInput, NewCourse>(br#"{"name": null}"#).unwrap_err();
        let InputError::Validation(problems) = err else {
            panic!("expected validation error");
        };
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].name, "name");
    }

    #[test]
    fn valid_course() {
        let course = decode_validate::<CourseInput, NewCourse>(br#"{"name": "Algebra"}"#).unwrap();
        assert_eq!(course.name, "Algebra");
    }
}
