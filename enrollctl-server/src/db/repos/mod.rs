//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Borrows the shared pool for the lifetime of one operation
//! - Uses transactions for multi-step operations
//! - Handles duplicate join rows via ON CONFLICT (no check-then-insert)
//!
//! Dropping a repository future cancels it; an open transaction is rolled
//! back when its handle is dropped uncommitted.

pub mod courses;
pub mod persons;

pub use courses::CourseRepo;
pub use persons::PersonRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// Precondition failed before the store was touched
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("enrollment references a course that does not exist")]
    UnknownCourse,

    #[error("conflict: {0}")]
    Conflict(String),
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}
