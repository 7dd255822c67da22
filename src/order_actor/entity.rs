use std::convert::Infallible;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::actions::{OrderAction, OrderActionResult};
use super::error::OrderError;
use crate::actor_framework::Entity;
use crate::domain::{lines_total, Order, OrderCreate, OrderStatus, MAX_LINE_QUANTITY};

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    // orders only change through status actions
    type Patch = Infallible;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Error = OrderError;

    fn id(&self) -> &String {
        &self.id
    }

    /// Places a new order in `Pending`, stamped with the current time.
    ///
    /// # Errors
    /// Rejects an empty item list, a line with zero or oversized quantity, a
    /// total that overflows, and a total that does not match the items.
    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, OrderError> {
        if params.items.is_empty() {
            return Err(OrderError::Validation("cannot place an order with no items".to_string()));
        }
        if let Some(line) = params.items.iter().find(|line| line.quantity == 0) {
            return Err(OrderError::Validation(format!(
                "item {} has zero quantity",
                line.item.id
            )));
        }
        if let Some(line) = params.items.iter().find(|line| line.quantity > MAX_LINE_QUANTITY) {
            return Err(OrderError::Validation(format!(
                "item {} exceeds the limit of {MAX_LINE_QUANTITY} units",
                line.item.id
            )));
        }
        let expected = lines_total(&params.items)
            .ok_or_else(|| OrderError::Validation("order total is too large to represent".to_string()))?;
        if params.total != expected {
            return Err(OrderError::Validation(format!(
                "total {} does not match items total {}",
                params.total, expected
            )));
        }

        Ok(Self {
            id,
            user_id: params.user_id,
            user_email: params.user_email,
            items: params.items,
            total: params.total,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        })
    }

    fn on_update(&mut self, patch: Infallible) -> Result<(), OrderError> {
        match patch {}
    }

    /// # Actions
    /// - `SetStatus`: changes `status` if the policy allows it
    fn handle_action(&mut self, action: OrderAction) -> Result<OrderActionResult, OrderError> {
        match action {
            OrderAction::SetStatus { status, policy } => {
                if !policy.allows(self.status, status) {
                    return Err(OrderError::InvalidTransition {
                        from: self.status,
                        to: status,
                    });
                }
                info!(order_id = %self.id, from = %self.status, to = %status, "Order status changed");
                self.status = status;
                Ok(OrderActionResult::SetStatus(self.clone()))
            }
        }
    }
}

/// Order ids of the form `ord<N>`, counting from `start`.
pub fn order_id_sequence(start: u64) -> impl Fn() -> String + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(start));
    move || format!("ord{}", counter.fetch_add(1, Ordering::SeqCst))
}
