use diesel::r2d2::PoolError;
use diesel::result::DatabaseErrorKind;
use thiserror::Error;

use crate::models::RowError;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Structural rules of the catalog tree that a write would break.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("category still has {count} subcategories")]
    CategoryHasChildren { count: i64 },
    #[error("category still holds {count} products")]
    CategoryHasProducts { count: i64 },
    #[error("parent category already holds products")]
    ParentHoldsProducts,
    #[error("category cannot be moved under itself or its own descendant")]
    CyclicParent,
    #[error("products can only be placed in a category without subcategories")]
    NotEndCategory,
}

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("`{field}` value `{value}` is already taken")]
    Conflict { field: &'static str, value: String },
    #[error(transparent)]
    Invariant(#[from] InvariantViolation),
    #[error("stored row is invalid: {0}")]
    InvalidRow(#[from] RowError),
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),
    #[error("database error: {0}")]
    Database(diesel::result::Error),
}

impl From<diesel::result::Error> for RepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        if let diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &err {
            if let Some(field) = unique_field(info.message()) {
                return RepositoryError::Conflict {
                    field,
                    value: String::new(),
                };
            }
        }

        match err {
            diesel::result::Error::NotFound => RepositoryError::NotFound,
            other => RepositoryError::Database(other),
        }
    }
}

/// Map SQLite's `UNIQUE constraint failed: table.column` message to a field name.
fn unique_field(message: &str) -> Option<&'static str> {
    if message.contains("products.sku") {
        Some("sku")
    } else if message.contains(".slug") {
        Some("slug")
    } else {
        None
    }
}
