use std::convert::Infallible;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rust_decimal::Decimal;

use super::error::CatalogError;

/// Highest price a menu item may carry.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);
use crate::actor_framework::Entity;
use crate::domain::{MenuItem, MenuItemDraft};

impl MenuItemDraft {
    /// Rejects negative or oversized prices and blank required text.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.price < Decimal::ZERO {
            return Err(CatalogError::Validation(format!(
                "price must not be negative, got {}",
                self.price
            )));
        }
        if self.price > MAX_PRICE {
            return Err(CatalogError::Validation(format!(
                "price must not exceed {MAX_PRICE}, got {}",
                self.price
            )));
        }
        for (field, value) in [
            ("name", &self.name),
            ("category", &self.category),
            ("image_url", &self.image_url),
        ] {
            if value.trim().is_empty() {
                return Err(CatalogError::Validation(format!("{field} is required")));
            }
        }
        Ok(())
    }
}

impl Entity for MenuItem {
    type Id = String;
    type CreateParams = MenuItemDraft;
    type Patch = MenuItemDraft;
    type Action = Infallible;
    type ActionResult = Infallible;
    type Error = CatalogError;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create_params(id: String, params: MenuItemDraft) -> Result<Self, CatalogError> {
        params.validate()?;
        Ok(Self {
            id,
            name: params.name,
            price: params.price,
            category: params.category,
            image_url: params.image_url,
            available: params.available,
        })
    }

    /// Replaces every field except the id.
    fn on_update(&mut self, patch: MenuItemDraft) -> Result<(), CatalogError> {
        patch.validate()?;
        self.name = patch.name;
        self.price = patch.price;
        self.category = patch.category;
        self.image_url = patch.image_url;
        self.available = patch.available;
        Ok(())
    }

    fn handle_action(&mut self, action: Infallible) -> Result<Infallible, CatalogError> {
        match action {}
    }
}

/// Numeric menu ids ("1", "2", ...) continuing after `start - 1`.
pub fn menu_id_sequence(start: u64) -> impl Fn() -> String + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(start));
    move || counter.fetch_add(1, Ordering::SeqCst).to_string()
}
