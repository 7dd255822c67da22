use rust_decimal::Decimal;
use tracing::{debug, error, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{CartItem, Order, OrderCreate, OrderStatus, TransitionPolicy};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};

/// Client for the order store: placement, status changes, and newest-first reads.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    policy: TransitionPolicy,
}

impl_client_methods!(OrderClient, Order, OrderError, order, orders);

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>, policy: TransitionPolicy) -> Self {
        Self { inner, policy }
    }

    /// The only way an order comes into existence.
    #[instrument(skip(self, items), fields(item_count = items.len(), total = %total))]
    pub async fn place_order(
        &self,
        user_id: String,
        user_email: String,
        items: Vec<CartItem>,
        total: Decimal,
    ) -> Result<Order, OrderError> {
        info!("Processing place_order request");
        if items.is_empty() {
            error!("Rejected empty order");
            return Err(OrderError::Validation("cannot place an order with no items".to_string()));
        }

        let params = OrderCreate {
            user_id,
            user_email,
            items,
            total,
        };
        let order = self.inner.create(params).await.inspect_err(|e| {
            error!(error = %e, "Order placement failed");
        })?;

        info!(order_id = %order.id, "Order placed");
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn set_order_status(&self, id: String, status: OrderStatus) -> Result<Order, OrderError> {
        debug!("Sending request");
        let action = OrderAction::SetStatus {
            status,
            policy: self.policy,
        };
        match self.inner.perform_action(id, action).await {
            Ok(OrderActionResult::SetStatus(order)) => Ok(order),
            Err(e) => {
                error!(error = %e, "Status update failed");
                Err(e)
            }
        }
    }

    /// Orders belonging to `user_id`, newest first.
    #[instrument(skip(self))]
    pub async fn list_orders_for_user(&self, user_id: String) -> Result<Vec<Order>, OrderError> {
        let orders = self.list_orders().await?;
        Ok(newest_first(
            orders.into_iter().filter(|order| order.user_id == user_id).collect(),
        ))
    }

    /// Every order, newest first.
    #[instrument(skip(self))]
    pub async fn list_all_orders(&self) -> Result<Vec<Order>, OrderError> {
        Ok(newest_first(self.list_orders().await?))
    }

    pub async fn shutdown(&self) -> Result<(), OrderError> {
        self.inner.shutdown().await
    }
}

/// Sorts by creation time descending; orders created in the same instant keep
/// reverse store (placement) order.
fn newest_first(mut orders: Vec<Order>) -> Vec<Order> {
    orders.reverse();
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    orders
}
