use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Duplicate identity: {0}")]
    Duplicate(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        Error::Database(err.to_string())
    }
}

impl From<Error> for portal_core::error::PortalError {
    fn from(err: Error) -> Self {
        use portal_core::error::PortalError;
        match err {
            Error::Database(msg) => PortalError::Database(msg),
            Error::NotFound(what) => PortalError::NotFound(what),
            Error::Duplicate(_) => PortalError::DuplicateIdentity,
        }
    }
}

/// Postgres reports unique-constraint violations as SQLSTATE 23505; the
/// pre-checks race with concurrent registrations, so the constraint is the
/// authority.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505")
    )
}
