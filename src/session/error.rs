use thiserror::Error;

use super::Capability;
use crate::domain::{CartError, Role};
use crate::menu_actor::CatalogError;
use crate::order_actor::OrderError;

/// The only message shown for a failed login, whatever the cause.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password. Please use a demo account.";

/// Errors surfaced to whoever drives a session.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    #[error("Not signed in")]
    NotAuthenticated,
    #[error("{role} users may not {capability:?}")]
    RoleViolation { role: Role, capability: Capability },
    #[error("Menu item is currently unavailable: {0}")]
    ItemUnavailable(String),
    #[error("Transport fault: {0}")]
    TransportFault(String),
    #[error(transparent)]
    Cart(#[from] CartError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Order(#[from] OrderError),
}

impl SessionError {
    /// Whether retrying the same operation later could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SessionError::TransportFault(_)
                | SessionError::Catalog(CatalogError::TransportFault(_))
                | SessionError::Order(OrderError::TransportFault(_))
        )
    }
}
