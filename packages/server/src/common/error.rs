//! Error kinds surfaced by the catalog, review and account operations.

use thiserror::Error;

use super::auth::AuthError;
use super::id::IdError;

/// Result alias used by every action.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Malformed, missing or out-of-range input. The caller can fix it.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The referenced entity does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The write would break a uniqueness rule.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A mutation was attempted without a resolved identity, or credentials
    /// did not check out.
    #[error(transparent)]
    Unauthorized(#[from] AuthError),

    /// Anything the store reported that is not classified above.
    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),

    /// Failures outside the store (hashing, token signing). Treated like a
    /// store fault by callers.
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl DirectoryError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Stable machine-readable kind, used in logs and HTTP bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::NotFound(_) => "not_found",
            Self::Conflict(_) => "conflict",
            Self::Unauthorized(_) => "unauthorized",
            Self::Store(_) => "store_fault",
            Self::Internal(_) => "internal",
        }
    }
}

impl From<IdError> for DirectoryError {
    fn from(err: IdError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}

/// How the store rejected a write, when it was a constraint and not a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintViolation {
    Unique,
    ForeignKey,
    Check,
}

/// Classify a store error as a constraint violation.
///
/// Returns `None` for connectivity problems and every other database error.
pub fn constraint_violation(err: &sqlx::Error) -> Option<ConstraintViolation> {
    let db_err = err.as_database_error()?;
    if db_err.is_unique_violation() {
        Some(ConstraintViolation::Unique)
    } else if db_err.is_foreign_key_violation() {
        Some(ConstraintViolation::ForeignKey)
    } else if db_err.is_check_violation() {
        Some(ConstraintViolation::Check)
    } else {
        None
    }
}
