//! # Canteen
//!
//! Ordering core for a campus canteen: students browse the menu, fill a cart
//! and place orders; admins maintain the menu and move orders through
//! fulfillment.
//!
//! ## Layout
//!
//! - **Stores** - one single-writer actor per collection → [`actor_framework::ResourceActor`]
//!     - menu items → [`menu_actor`], orders → [`order_actor`]
//!     - typed clients with timeout-bounded calls → [`clients::CatalogClient`], [`clients::OrderClient`]
//! - **Session** - sign-in, the capability table, the cart, and the current view → [`session::Session`]
//! - **Routing** - role + requested view → resolved view → [`router::resolve`]
//! - **System** - startup, seeding, and shutdown → [`app_system::CanteenSystem`]
//!
//! ## Example Usage
//!
//! ```no_run
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use canteen::app_system::{CanteenSystem, Settings};
//!
//! let system = CanteenSystem::new(&Settings::default());
//! let mut session = system.session();
//! session.login("student@college.com", "password123").await?;
//! session.add_to_cart_by_id("1").await?;
//! let order = session.place_order().await?;
//! println!("placed {} for {}", order.id, order.total);
//! system.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod actor_framework;
pub mod app_system;
pub mod clients;
pub mod domain;
pub mod menu_actor;
pub mod order_actor;
pub mod router;
pub mod session;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod mock_framework;
