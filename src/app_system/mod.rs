//! System orchestration, configuration, startup, and shutdown logic.

pub mod canteen_system;
pub mod config;
pub mod seed;
pub mod tracing;

pub use self::tracing::*;
pub use canteen_system::*;
pub use config::*;
