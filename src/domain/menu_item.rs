use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An orderable dish on the canteen menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub category: String,
    pub image_url: String,
    pub available: bool,
}

/// Everything needed to create a menu item; the store assigns the id.
///
/// Also used as the full replacement when an existing item is updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemDraft {
    pub name: String,
    pub price: Decimal,
    pub category: String,
    pub image_url: String,
    pub available: bool,
}

impl MenuItemDraft {
    pub fn new(
        name: impl Into<String>,
        price: Decimal,
        category: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price,
            category: category.into(),
            image_url: image_url.into(),
            available: true,
        }
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }
}

impl From<MenuItem> for MenuItemDraft {
    fn from(item: MenuItem) -> Self {
        Self {
            name: item.name,
            price: item.price,
            category: item.category,
            image_url: item.image_url,
            available: item.available,
        }
    }
}
