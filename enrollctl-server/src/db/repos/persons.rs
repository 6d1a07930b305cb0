//! Person repository
//!
//! Persons are addressed by first name. Every mutation touching more than
//! one statement runs in a single transaction, so a reader never sees a
//! person whose enrollment set reflects only part of a change.
//!
//! Statement order inside a mutation is fixed: resolve the id (row locked),
//! then write scalar fields, then clear and reinsert enrollments.
//!
//! Reads take one snapshot for the person rows and their enrollments, so a
//! concurrent update is seen either entirely or not at all.

use sqlx::{FromRow, PgConnection, PgPool, Postgres, Transaction};

use super::DbError;
use crate::models::{NewPerson, Person, PersonType};

/// Person row without enrollments
#[derive(Debug, FromRow)]
struct PersonRow {
    id: i32,
    first_name: String,
    last_name: String,
    #[sqlx(rename = "type")]
    kind: String,
    age: i32,
}

impl PersonRow {
    fn into_person(self, courses: Vec<i32>) -> Result<Person, DbError> {
        let kind = self
            .kind
            .parse::<PersonType>()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(Person {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            kind,
            age: self.age,
            courses,
        })
    }
}

/// Person repository
pub struct PersonRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PersonRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all persons ordered by id, each with its enrollment set.
    pub async fn list(&self) -> Result<Vec<Person>, DbError> {
        let mut tx = self.begin_snapshot().await?;

        let rows = sqlx::query_as::<_, PersonRow>(
            "SELECT id, first_name, last_name, type, age FROM person ORDER BY id",
        )
        .fetch_all(&mut *tx)
        .await?;

        let mut persons = Vec::with_capacity(rows.len());
        for row in rows {
            let courses = enrollment(&mut tx, row.id).await?;
            persons.push(row.into_person(courses)?);
        }

        tx.commit().await?;
        Ok(persons)
    }

    /// Get a person by first name, with its enrollment set.
    pub async fn get_by_first_name(&self, first_name: &str) -> Result<Person, DbError> {
        let mut tx = self.begin_snapshot().await?;

        let row = sqlx::query_as::<_, PersonRow>(
            "SELECT id, first_name, last_name, type, age FROM person WHERE first_name = $1",
        )
        .bind(first_name)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("person", first_name))?;

        let courses = enrollment(&mut tx, row.id).await?;
        tx.commit().await?;
        row.into_person(courses)
    }

    /// Insert a person and its enrollments (atomic).
    pub async fn create(&self, person: NewPerson) -> Result<Person, DbError> {
        let mut tx = self.pool.begin().await?;

        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO person (first_name, last_name, type, age)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&person.first_name)
        .bind(&person.last_name)
        .bind(person.kind.as_str())
        .bind(person.age)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| duplicate_first_name(e, &person.first_name))?;

        insert_enrollment(&mut tx, id, &person.courses).await?;

        tx.commit().await?;
        tracing::debug!(id, courses = person.courses.len(), "person created");
        Ok(person.into_person(id))
    }

    /// Replace a person's fields and enrollment set (atomic).
    ///
    /// Existing enrollments are cleared and the new set inserted; nothing is
    /// merged with the previous state.
    pub async fn update(&self, first_name: &str, person: NewPerson) -> Result<Person, DbError> {
        check_required(&person)?;

        let mut tx = self.pool.begin().await?;

        let Some(id) = resolve_id(&mut tx, first_name).await? else {
            tx.rollback().await?;
            return Err(DbError::not_found("person", first_name));
        };

        sqlx::query(
            r#"
            UPDATE person
            SET first_name = $1, last_name = $2, type = $3, age = $4
            WHERE id = $5
            "#,
        )
        .bind(&person.first_name)
        .bind(&person.last_name)
        .bind(person.kind.as_str())
        .bind(person.age)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| duplicate_first_name(e, &person.first_name))?;

        sqlx::query("DELETE FROM person_course WHERE person_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        insert_enrollment(&mut tx, id, &person.courses).await?;

        tx.commit().await?;
        tracing::debug!(id, courses = person.courses.len(), "person updated");
        Ok(person.into_person(id))
    }

    /// Delete a person and all of its enrollments (atomic).
    pub async fn delete(&self, first_name: &str) -> Result<(), DbError> {
        let mut tx = self.pool.begin().await?;

        let Some(id) = resolve_id(&mut tx, first_name).await? else {
            tx.rollback().await?;
            return Err(DbError::not_found("person", first_name));
        };

        sqlx::query("DELETE FROM person_course WHERE person_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM person WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(DbError::not_found("person", first_name));
        }

        tx.commit().await?;
        tracing::debug!(id, "person deleted");
        Ok(())
    }

    /// Read-only transaction whose statements all see one snapshot.
    async fn begin_snapshot(&self) -> Result<Transaction<'static, Postgres>, DbError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY")
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }
}

async fn enrollment(conn: &mut PgConnection, person_id: i32) -> Result<Vec<i32>, DbError> {
    let courses = sqlx::query_scalar::<_, i32>(
        "SELECT course_id FROM person_course WHERE person_id = $1 ORDER BY course_id",
    )
    .bind(person_id)
    .fetch_all(conn)
    .await?;
    Ok(courses)
}

/// Look up a person id by first name, locking the row until commit.
async fn resolve_id(
    tx: &mut Transaction<'_, Postgres>,
    first_name: &str,
) -> Result<Option<i32>, DbError> {
    let id = sqlx::query_scalar::<_, i32>(
        "SELECT id FROM person WHERE first_name = $1 FOR UPDATE",
    )
    .bind(first_name)
    .fetch_optional(&mut **tx)
    .await?;
    Ok(id)
}

async fn insert_enrollment(
    tx: &mut Transaction<'_, Postgres>,
    person_id: i32,
    courses: &[i32],
) -> Result<(), DbError> {
    for &course_id in courses {
        sqlx::query(
            r#"
            INSERT INTO person_course (person_id, course_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(person_id)
        .bind(course_id)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.is_foreign_key_violation() {
                    return DbError::UnknownCourse;
                }
            }
            DbError::Sqlx(e)
        })?;
    }
    Ok(())
}

fn duplicate_first_name(e: sqlx::Error, first_name: &str) -> DbError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return DbError::Conflict(format!("person '{}' already exists", first_name));
        }
    }
    DbError::Sqlx(e)
}

fn check_required(person: &NewPerson) -> Result<(), DbError> {
    if person.first_name.is_empty() || person.last_name.is_empty() || person.age <= 0 {
        return Err(DbError::InvalidInput("invalid person data".to_owned()));
    }
    Ok(())
}
