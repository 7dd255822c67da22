pub mod cart;
pub mod menu_item;
pub mod order;
pub mod user;

pub use cart::*;
pub use menu_item::*;
pub use order::*;
pub use user::*;
