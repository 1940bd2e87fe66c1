//! Database helpers for user identities and service providers.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use tracing::Instrument;
use uuid::Uuid;

pub(crate) struct UserRecord {
    pub(crate) id: Uuid,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) password_hash: String,
    #[allow(dead_code)]
    pub(crate) created_at: DateTime<Utc>,
}

impl std::fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password_hash", &"***")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Outcome when attempting to create a new user.
#[derive(Debug)]
pub(crate) enum InsertOutcome {
    Created(UserRecord),
    Conflict,
}

/// Outcome of a profile update.
#[derive(Debug)]
pub(crate) enum UpdateOutcome {
    Updated(UserRecord),
    Conflict,
    NotFound,
}

/// Outcome when attempting to register a service provider.
#[derive(Debug)]
pub(crate) enum ProviderOutcome {
    Created,
    Conflict,
}

pub(crate) struct ProviderInsert<'a> {
    pub(crate) name: &'a str,
    pub(crate) email: &'a str,
    pub(crate) password_hash: &'a str,
    pub(crate) phone: &'a str,
    pub(crate) age: i32,
    pub(crate) experience: i32,
    pub(crate) service_type: &'a str,
    pub(crate) location: &'a str,
    pub(crate) city: &'a str,
    pub(crate) address: &'a str,
    pub(crate) bio: &'a str,
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

fn user_from_row(row: &sqlx::postgres::PgRow) -> UserRecord {
    UserRecord {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        created_at: row.get("created_at"),
    }
}

/// Insert a new identity. The `UNIQUE` constraint on `email` is the
/// uniqueness check; a concurrent signup with the same address loses the
/// race here and gets `Conflict`.
pub(crate) async fn insert_user(
    pool: &PgPool,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<InsertOutcome> {
    let query = r"
        INSERT INTO users (name, email, password_hash)
        VALUES ($1, $2, $3)
        RETURNING id, name, email, password_hash, created_at
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(pool)
        .instrument(span)
        .await;

    match row {
        Ok(row) => Ok(InsertOutcome::Created(user_from_row(&row))),
        Err(err) if is_unique_violation(&err) => Ok(InsertOutcome::Conflict),
        Err(err) => Err(err).context("failed to insert user"),
    }
}

/// Look up an identity by normalized email.
pub(crate) async fn lookup_user_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRecord>> {
    let query = r"
        SELECT id, name, email, password_hash, created_at
        FROM users
        WHERE email = $1
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(email)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to lookup user by email")?;

    Ok(row.map(|row| user_from_row(&row)))
}

pub(crate) async fn lookup_user_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserRecord>> {
    let query = r"
        SELECT id, name, email, password_hash, created_at
        FROM users
        WHERE id = $1
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(id)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to lookup user by id")?;

    Ok(row.map(|row| user_from_row(&row)))
}

/// Update name and/or email; omitted fields keep their current value. An
/// email change is subject to the same uniqueness constraint as signup.
pub(crate) async fn update_profile(
    pool: &PgPool,
    id: Uuid,
    name: Option<&str>,
    email: Option<&str>,
) -> Result<UpdateOutcome> {
    let query = r"
        UPDATE users
        SET name = COALESCE($2, name),
            email = COALESCE($3, email),
            updated_at = NOW()
        WHERE id = $1
        RETURNING id, name, email, password_hash, created_at
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(id)
        .bind(name)
        .bind(email)
        .fetch_optional(pool)
        .instrument(span)
        .await;

    match row {
        Ok(Some(row)) => Ok(UpdateOutcome::Updated(user_from_row(&row))),
        Ok(None) => Ok(UpdateOutcome::NotFound),
        Err(err) if is_unique_violation(&err) => Ok(UpdateOutcome::Conflict),
        Err(err) => Err(err).context("failed to update profile"),
    }
}

pub(crate) async fn insert_provider(
    pool: &PgPool,
    provider: &ProviderInsert<'_>,
) -> Result<ProviderOutcome> {
    let query = r"
        INSERT INTO service_providers
            (name, email, password_hash, phone, age, experience,
             service_type, location, city, address, bio)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    let result = sqlx::query(query)
        .bind(provider.name)
        .bind(provider.email)
        .bind(provider.password_hash)
        .bind(provider.phone)
        .bind(provider.age)
        .bind(provider.experience)
        .bind(provider.service_type)
        .bind(provider.location)
        .bind(provider.city)
        .bind(provider.address)
        .bind(provider.bio)
        .execute(pool)
        .instrument(span)
        .await;

    match result {
        Ok(_) => Ok(ProviderOutcome::Created),
        Err(err) if is_unique_violation(&err) => Ok(ProviderOutcome::Conflict),
        Err(err) => Err(err).context("failed to insert service provider"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    #[derive(Debug)]
    struct TestDbError {
        code: Option<&'static str>,
    }

    impl fmt::Display for TestDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "test database error")
        }
    }

    impl StdError for TestDbError {}

    impl DatabaseError for TestDbError {
        fn message(&self) -> &'static str {
            "test database error"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            self.code.map(Cow::Borrowed)
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::UniqueViolation
        }
    }

    #[test]
    fn is_unique_violation_matches_sqlstate() {
        let err = sqlx::Error::Database(Box::new(TestDbError {
            code: Some("23505"),
        }));
        assert!(is_unique_violation(&err));

        let err = sqlx::Error::Database(Box::new(TestDbError {
            code: Some("99999"),
        }));
        assert!(!is_unique_violation(&err));

        let err = sqlx::Error::RowNotFound;
        assert!(!is_unique_violation(&err));
    }

    #[test]
    fn outcome_debug_names() {
        assert_eq!(format!("{:?}", InsertOutcome::Conflict), "Conflict");
        assert_eq!(format!("{:?}", UpdateOutcome::NotFound), "NotFound");
        assert_eq!(format!("{:?}", ProviderOutcome::Created), "Created");
    }

    #[test]
    fn user_record_debug_redacts_password_hash() {
        let record = UserRecord {
            id: Uuid::new_v4(),
            name: "Jo".to_string(),
            email: "a@b.com".to_string(),
            password_hash: "$2b$12$secret-hash".to_string(),
            created_at: Utc::now(),
        };
        let debug = format!("{:?}", InsertOutcome::Created(record));
        assert!(!debug.contains("secret-hash"));
        assert!(debug.contains("***"));
        assert!(debug.contains("a@b.com"));
    }
}
