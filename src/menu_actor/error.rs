use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Menu item not found: {0}")]
    NotFound(String),
    #[error("Menu item validation error: {0}")]
    Validation(String),
    #[error("Menu item id already in use: {0}")]
    DuplicateId(String),
    #[error("Transport fault: {0}")]
    TransportFault(String),
}

impl From<FrameworkError> for CatalogError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound(id) => CatalogError::NotFound(id),
            FrameworkError::DuplicateId(id) => CatalogError::DuplicateId(id),
            other => CatalogError::TransportFault(other.to_string()),
        }
    }
}
