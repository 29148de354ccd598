use thiserror::Error;

use crate::repository::RepositoryError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures returned to RPC callers.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The payload was rejected before any write.
    #[error("{0}")]
    Form(String),
    #[error("record not found")]
    NotFound,
    /// A unique business identifier is already in use.
    #[error("{message}")]
    Conflict { field: &'static str, message: String },
    /// The write would break a structural rule of the catalog tree.
    #[error("{0}")]
    Invariant(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Conflict { field, value } => {
                let message = if value.is_empty() {
                    format!("{field} is already in use")
                } else {
                    format!("{field} `{value}` is already in use")
                };
                ServiceError::Conflict { field, message }
            }
            RepositoryError::Invariant(violation) => ServiceError::Invariant(violation.to_string()),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}
