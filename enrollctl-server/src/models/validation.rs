//! Validation error types

use std::fmt;

use serde::Serialize;

/// A single rule violation on an input field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Numeric field must be strictly positive
    NotPositive { field: &'static str },

    /// Invalid enum variant
    InvalidVariant {
        field: &'static str,
        expected: &'static str,
    },
}

impl ValidationError {
    /// Name of the offending field, as it appears in request bodies.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Empty { field }
            | Self::NotPositive { field }
            | Self::InvalidVariant { field, .. } => field,
        }
    }

    /// Human-readable rule description, without the field name.
    pub fn description(&self) -> String {
        match self {
            Self::Empty { .. } => "must not be blank".to_owned(),
            Self::NotPositive { .. } => "must be greater than 0".to_owned(),
            Self::InvalidVariant { expected, .. } => format!("must be {}", expected),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field(), self.description())
    }
}

impl std::error::Error for ValidationError {}

/// Wire form of a validation failure: `{"name": ..., "description": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub name: String,
    pub description: String,
}

impl From<&ValidationError> for Problem {
    fn from(e: &ValidationError) -> Self {
        Self {
            name: e.field().to_owned(),
            description: e.description(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ValidationError::InvalidVariant {
            field: "type",
            expected: "student or professor",
        };
        assert_eq!(err.to_string(), "type must be student or professor");
    }

    #[test]
    fn problem_from_error() {
        let problem = Problem::from(&ValidationError::NotPositive { field: "age" });
        assert_eq!(problem.name, "age");
        assert_eq!(problem.description, "must be greater than 0");
    }

    #[test]
    fn problem_serializes_name_and_description() {
        let problem = Problem::from(&ValidationError::Empty { field: "name" });
        let json = serde_json::to_value(&problem).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "name", "description": "must not be blank"})
        );
    }
}
