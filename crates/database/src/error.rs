use sea_orm::{DbErr, SqlErr};

/// Errors surfaced by the catalog services
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{0}")]
    ValidationFailed(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl CatalogError {
    pub fn missing_fields(fields: &[&str]) -> Self {
        Self::ValidationFailed(format!("Missing required field(s): {}.", fields.join(", ")))
    }
}

/// Whether the error comes from a violated unique index
pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Turns a unique index violation into the given business error
pub(crate) fn unique_violation_as(err: DbErr, on_violation: CatalogError) -> CatalogError {
    if is_unique_violation(&err) {
        on_violation
    } else {
        CatalogError::Database(err)
    }
}
