//! Request body pipeline: decode, validate, then map to a domain type.
//!
//! Every mutating endpoint runs its body through [`decode_validate`]:
//!
//! 1. structural decode into an input shape (`Decode` on failure)
//! 2. all validation rules of the shape (`Validation` with every problem)
//! 3. conversion into the domain type (`Mapping` on failure)
//!
//! A later stage never runs when an earlier one failed.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use super::validation::{Problem, ValidationError};

/// Input shape with field-level rules.
pub trait Validate {
    /// Run every rule and return all violations (empty when valid).
    fn validate(&self) -> Vec<ValidationError>;
}

/// Conversion from a validated input shape into a domain type.
pub trait MapTo<T> {
    fn map_to(self) -> Result<T, MappingError>;
}

/// Mapping failed after validation succeeded
#[derive(Debug, Clone, thiserror::Error)]
#[error("cannot map {field}: {reason}")]
pub struct MappingError {
    pub field: &'static str,
    pub reason: String,
}

/// Failure of one of the three pipeline stages
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// Body is not well-formed JSON for the input shape
    #[error("malformed request body: {0}")]
    Decode(#[source] serde_json::Error),

    /// One or more validation rules failed
    #[error("invalid input: {} problems", .0.len())]
    Validation(Vec<Problem>),

    #[error(transparent)]
    Mapping(#[from] MappingError),
}

/// Field deserializer treating an explicit `null` like a missing field.
///
/// Use together with `#[serde(default)]` so both cases reach validation.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode `body` as `I`, validate it, and map it to `O`.
pub fn decode_validate<I, O>(body: &[u8]) -> Result<O, InputError>
where
    I: DeserializeOwned + Validate + MapTo<O>,
{
    let input: I = serde_json::from_slice(body).map_err(InputError::Decode)?;

    let problems = input.validate();
    if !problems.is_empty() {
        return Err(InputError::Validation(
            problems.iter().map(Problem::from).collect(),
        ));
    }

    Ok(input.map_to()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default)]
        label: String,
        #[serde(default)]
        weight: i64,
    }

    impl Validate for Sample {
        fn validate(&self) -> Vec<ValidationError> {
            let mut problems = Vec::new();
            if self.label.is_empty() {
                problems.push(ValidationError::Empty { field: "label" });
            }
            if self.weight <= 0 {
                problems.push(ValidationError::NotPositive { field: "weight" });
            }
            problems
        }
    }

    impl MapTo<u8> for Sample {
        fn map_to(self) -> Result<u8, MappingError> {
            u8::try_from(self.weight).map_err(|e| MappingError {
                field: "weight",
                reason: e.to_string(),
            })
        }
    }

    #[test]
    fn malformed_body_is_decode_error() {
        let err = decode_validate::<Sample, u8>(br#"{"label": "x""#).unwrap_err();
        assert!(matches!(err, InputError::Decode(_)));
    }

    #[test]
    fn wrong_field_type_is_decode_error() {
        let err = decode_validate::<Sample, u8>(br#"{"label": 3}"#).unwrap_err();
        assert!(matches!(err, InputError::Decode(_)));
    }

    #[test]
    fn reports_every_problem() {
        let err = decode_validate::<Sample, u8>(b"{}").unwrap_err();
        let InputError::Validation(problems) = err else {
            panic!("expected validation error, got {err:?}");
        };
        let names: Vec<_> = problems.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["label", "weight"]);
    }

    #[test]
    fn mapping_runs_only_after_validation() {
        let err = decode_validate::<Sample, u8>(br#"{"label": "x", "weight": 300}"#).unwrap_err();
        assert!(matches!(err, InputError::Mapping(MappingError { field: "weight", .. })));
    }

    #[test]
    fn valid_body_maps() {
        let out = decode_validate::<Sample, u8>(br#"{"label": "x", "weight": 7}"#).unwrap();
        assert_eq!(out, 7);
    }
}
