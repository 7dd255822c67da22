//! The session-scoped cart. Pure state; it never talks to a store.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::MenuItem;

/// Most units of one item a single cart line may hold.
pub const MAX_LINE_QUANTITY: u32 = 999;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("quantity {requested} exceeds the limit of {max} per item")]
    QuantityLimit { requested: i64, max: u32 },
    #[error("cart total is too large to represent")]
    TotalOverflow,
}

/// A menu item snapshot together with how many units were picked.
///
/// `quantity` is always at least 1 while the line lives in a [`Cart`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub item: MenuItem,
    pub quantity: u32,
}

impl CartItem {
    pub fn new(item: MenuItem, quantity: u32) -> Self {
        Self { item, quantity }
    }

    pub fn id(&self) -> &str {
        &self.item.id
    }

    /// `None` when price × quantity does not fit in a `Decimal`.
    pub fn line_total(&self) -> Option<Decimal> {
        self.item.price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Sum of price × quantity over `lines`, or `None` on overflow.
pub fn lines_total<'a>(lines: impl IntoIterator<Item = &'a CartItem>) -> Option<Decimal> {
    lines
        .into_iter()
        .try_fold(Decimal::ZERO, |sum, line| sum.checked_add(line.line_total()?))
}

/// Edits that would push a line past [`MAX_LINE_QUANTITY`] or overflow the
/// total are rejected and leave the cart as it was.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
    total: Decimal,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `item`, bumping an existing line in place.
    pub fn add(&mut self, item: &MenuItem) -> Result<(), CartError> {
        let mut items = self.items.clone();
        match items.iter_mut().find(|line| line.item.id == item.id) {
            Some(line) if line.quantity >= MAX_LINE_QUANTITY => {
                return Err(CartError::QuantityLimit {
                    requested: i64::from(line.quantity) + 1,
                    max: MAX_LINE_QUANTITY,
                });
            }
            Some(line) => line.quantity += 1,
            None => items.push(CartItem::new(item.clone(), 1)),
        }
        self.commit(items)
    }

    /// Sets the quantity of a line; anything `<= 0` removes it.
    ///
    /// Unknown ids are ignored.
    pub fn set_quantity(&mut self, item_id: &str, quantity: i64) -> Result<(), CartError> {
        if quantity <= 0 {
            let items = self.items.iter().filter(|line| line.item.id != item_id).cloned().collect();
            return self.commit(items);
        }
        let accepted = u32::try_from(quantity)
            .ok()
            .filter(|q| *q <= MAX_LINE_QUANTITY)
            .ok_or(CartError::QuantityLimit {
                requested: quantity,
                max: MAX_LINE_QUANTITY,
            })?;
        let mut items = self.items.clone();
        if let Some(line) = items.iter_mut().find(|line| line.item.id == item_id) {
            line.quantity = accepted;
        }
        self.commit(items)
    }

    fn commit(&mut self, items: Vec<CartItem>) -> Result<(), CartError> {
        self.total = lines_total(&items).ok_or(CartError::TotalOverflow)?;
        self.items = items;
        Ok(())
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.total = Decimal::ZERO;
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of units across all lines (the header badge).
    pub fn unit_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn quantity_of(&self, item_id: &str) -> Option<u32> {
        self.items
            .iter()
            .find(|line| line.item.id == item_id)
            .map(|line| line.quantity)
    }
}
