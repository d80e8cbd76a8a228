use crate::error::DbError;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct UserRepo;

impl UserRepo {
    /// Insert a new user. Email uniqueness is enforced by the database;
    /// a violation comes back as `DbError::DuplicateEmail`.
    pub async fn create(
        pool: &PgPool,
        email: &str,
        password_hash: &str,
        full_name: Option<&str>,
    ) -> Result<UserRow, DbError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"INSERT INTO users (email, password_hash, full_name)
               VALUES ($1, $2, $3)
               RETURNING id, email, password_hash, full_name, is_active, created_at, updated_at"#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(full_name)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    pub async fn get_by_id(pool: &PgPool, id: i64) -> Result<Option<UserRow>, DbError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"SELECT id, email, password_hash, full_name, is_active, created_at, updated_at
               FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    pub async fn get_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRow>, DbError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"SELECT id, email, password_hash, full_name, is_active, created_at, updated_at
               FROM users WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<UserRow>, DbError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"SELECT id, email, password_hash, full_name, is_active, created_at, updated_at
               FROM users ORDER BY id LIMIT $1 OFFSET $2"#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    /// Partial update: absent fields keep their stored value. Returns `None`
    /// when no user has the given id.
    pub async fn update(
        pool: &PgPool,
        id: i64,
        email: Option<&str>,
        password_hash: Option<&str>,
        full_name: Option<&str>,
    ) -> Result<Option<UserRow>, DbError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"UPDATE users
               SET email = COALESCE($2, email),
                   password_hash = COALESCE($3, password_hash),
                   full_name = COALESCE($4, full_name),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING id, email, password_hash, full_name, is_active, created_at, updated_at"#,
        )
        .bind(id)
        .bind(email)
        .bind(password_hash)
        .bind(full_name)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    /// Hard delete. Returns false when no user has the given id.
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
