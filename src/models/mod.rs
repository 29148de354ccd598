use thiserror::Error;

use crate::domain::product::UnknownAvailability;
use crate::domain::translation::UnknownLanguage;

pub mod brand;
pub mod category;
pub mod product;

/// Raised when a stored row cannot be mapped onto its domain type.
#[derive(Debug, Error)]
pub enum RowError {
    #[error(transparent)]
    Language(#[from] UnknownLanguage),
    #[error(transparent)]
    Availability(#[from] UnknownAvailability),
    #[error("malformed image list: {0}")]
    Images(#[from] serde_json::Error),
}
