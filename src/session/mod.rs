//! Authentication and role gating for one signed-in user.

pub mod auth;
pub mod capability;
pub mod error;
pub mod gate;

pub use auth::*;
pub use capability::*;
pub use error::*;
pub use gate::*;
