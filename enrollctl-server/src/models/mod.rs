//! Domain models and request validation
//!
//! Request bodies are decoded into input shapes, validated rule by rule,
//! then mapped into domain types. Invalid input returns an error, not panic.

pub mod validation;
pub mod input;
pub mod course;
pub mod person;

pub use validation::{Problem, ValidationError};
pub use input::{decode_validate, InputError, MapTo, MappingError, Validate};
pub use course::{Course, CourseInput, NewCourse};
pub use person::{normalize_courses, NewPerson, Person, PersonInput, PersonType};
