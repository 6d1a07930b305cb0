//! Course repository
//!
//! Every operation is a single statement; no transaction needed.
//! Zero rows affected on update/delete means the course does not exist.

use sqlx::PgPool;

use super::DbError;
use crate::models::Course;

/// Course repository
pub struct CourseRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CourseRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all courses ordered by id.
    pub async fn list(&self) -> Result<Vec<Course>, DbError> {
        let courses = sqlx::query_as::<_, Course>("SELECT id, name FROM course ORDER BY id")
            .fetch_all(self.pool)
            .await?;
        Ok(courses)
    }

    /// Get a single course by id.
    pub async fn get(&self, id: i32) -> Result<Course, DbError> {
        sqlx::query_as::<_, Course>("SELECT id, name FROM course WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("course", id))
    }

    /// Insert a course, returning it with its generated id.
    pub async fn create(&self, name: &str) -> Result<Course, DbError> {
        let course = sqlx::query_as::<_, Course>(
            "INSERT INTO course (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(self.pool)
        .await?;
        Ok(course)
    }

    /// Rename a course.
    pub async fn update(&self, id: i32, name: &str) -> Result<Course, DbError> {
        let result = sqlx::query("UPDATE course SET name = $1 WHERE id = $2")
            .bind(name)
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("course", id));
        }

        Ok(Course {
            id,
            name: name.to_owned(),
        })
    }

    /// Delete a course. Enrollments in it go with it.
    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM course WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("course", id));
        }

        Ok(())
    }
}
