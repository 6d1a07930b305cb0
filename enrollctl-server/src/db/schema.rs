//! Table bootstrap for courses, persons and enrollments
//!
//! Idempotent `CREATE TABLE IF NOT EXISTS`; there is no versioning.

use sqlx::PgPool;

/// Create the course, person and person_course tables if missing.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("ensuring database schema");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS course (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL CHECK (name <> '')
        )
        "#,
    )
    .execute(pool)
    .await?;

    // first_name is the external lookup key for persons
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS person (
            id SERIAL PRIMARY KEY,
            first_name TEXT NOT NULL UNIQUE CHECK (first_name <> ''),
            last_name TEXT NOT NULL CHECK (last_name <> ''),
            type TEXT NOT NULL CHECK (type IN ('student', 'professor')),
            age INTEGER NOT NULL CHECK (age > 0)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Person deletion clears join rows explicitly; course deletion cascades.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS person_course (
            person_id INTEGER NOT NULL REFERENCES person(id),
            course_id INTEGER NOT NULL REFERENCES course(id) ON DELETE CASCADE,
            PRIMARY KEY (person_id, course_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
