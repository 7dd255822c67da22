//! Menu-item domain logic for the catalog store: draft validation and id rules.

pub mod entity;
pub mod error;

pub use entity::*;
pub use error::*;
