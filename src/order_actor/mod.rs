//! Order-specific domain logic: placement validation and the status workflow.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::*;
pub use error::*;
