use thiserror::Error;

/// Repository error. Unique-constraint violations are surfaced as their own
/// variant so callers can answer with a conflict instead of a generic failure.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("email already exists")]
    DuplicateEmail,
    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                DbError::DuplicateEmail
            }
            _ => DbError::Sqlx(err),
        }
    }
}
