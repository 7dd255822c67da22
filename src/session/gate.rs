use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, instrument, warn};

use super::{Authenticator, Capability, SessionError};
use crate::clients::{CatalogClient, OrderClient};
use crate::domain::{Cart, MenuItem, MenuItemDraft, Order, OrderStatus, User};
use crate::menu_actor::CatalogError;
use crate::router::{View, ViewRouter};

/// Timeout-bounded front door to the credential collaborator.
#[derive(Clone)]
pub struct SessionGate {
    authenticator: Arc<dyn Authenticator>,
    timeout: Duration,
}

impl SessionGate {
    pub fn new(authenticator: Arc<dyn Authenticator>, timeout: Duration) -> Self {
        Self { authenticator, timeout }
    }

    /// `Ok(None)` means the credentials did not match; only a collaborator
    /// fault or timeout is an error.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>, SessionError> {
        match tokio::time::timeout(self.timeout, self.authenticator.authenticate(email, password)).await {
            Ok(Ok(user)) => Ok(user),
            Ok(Err(e)) => {
                error!(error = %e, "Authentication collaborator failed");
                Err(SessionError::TransportFault(e.to_string()))
            }
            Err(_) => {
                error!(timeout_ms = self.timeout.as_millis(), "Authentication timed out");
                Err(SessionError::TransportFault(format!(
                    "authentication timed out after {:?}",
                    self.timeout
                )))
            }
        }
    }
}

/// One signed-in browser tab: who is signed in, their cart, and the current
/// view. Every operation checks the role's capabilities before touching a store.
pub struct Session {
    gate: SessionGate,
    catalog: CatalogClient,
    orders: OrderClient,
    user: Option<User>,
    cart: Cart,
    router: ViewRouter,
}

impl Session {
    pub fn new(gate: SessionGate, catalog: CatalogClient, orders: OrderClient) -> Self {
        Self {
            gate,
            catalog,
            orders,
            user: None,
            cart: Cart::new(),
            router: ViewRouter::new(),
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn view(&self) -> View {
        self.router.current()
    }

    fn require(&self, capability: Capability) -> Result<&User, SessionError> {
        let user = self.user.as_ref().ok_or(SessionError::NotAuthenticated)?;
        if !user.role.can(capability) {
            warn!(user_id = %user.id, role = %user.role, ?capability, "Capability denied");
            return Err(SessionError::RoleViolation {
                role: user.role,
                capability,
            });
        }
        Ok(user)
    }

    // --- sign in / out ---

    /// Signs in and lands on the role's home view. Returns `Ok(None)` for bad
    /// credentials; show [`super::INVALID_CREDENTIALS_MESSAGE`] in that case.
    #[instrument(skip(self, password))]
    pub async fn login(&mut self, email: &str, password: &str) -> Result<Option<User>, SessionError> {
        let Some(user) = self.gate.authenticate(email, password).await? else {
            info!("Login rejected");
            return Ok(None);
        };

        self.logout();
        let view = self.router.land(user.role);
        info!(user_id = %user.id, role = %user.role, ?view, "Login succeeded");
        self.user = Some(user.clone());
        Ok(Some(user))
    }

    /// Drops the user and the cart. Nothing is sent to any store.
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            debug!(user_id = %user.id, "Logging out");
        }
        self.cart.clear();
        self.router.reset();
    }

    pub fn navigate(&mut self, requested: View) -> View {
        let role = self.user.as_ref().map(|user| user.role);
        self.router.navigate(role, requested)
    }

    // --- menu and cart ---

    pub async fn menu(&self) -> Result<Vec<MenuItem>, SessionError> {
        self.require(Capability::BrowseMenu)?;
        Ok(self.catalog.list_menu_items().await?)
    }

    /// Adds one unit of `item` to the cart.
    pub fn add_to_cart(&mut self, item: &MenuItem) -> Result<(), SessionError> {
        self.require(Capability::ManageCart)?;
        if !item.available {
            return Err(SessionError::ItemUnavailable(item.name.clone()));
        }
        self.cart.add(item)?;
        debug!(item_id = %item.id, units = self.cart.unit_count(), "Added to cart");
        Ok(())
    }

    /// Looks the item up in the catalog first, so the cart gets the current snapshot.
    pub async fn add_to_cart_by_id(&mut self, item_id: &str) -> Result<(), SessionError> {
        self.require(Capability::ManageCart)?;
        let item = self
            .catalog
            .get_menu_item(item_id.to_string())
            .await?
            .ok_or_else(|| CatalogError::NotFound(item_id.to_string()))?;
        self.add_to_cart(&item)
    }

    pub fn update_cart(&mut self, item_id: &str, quantity: i64) -> Result<(), SessionError> {
        self.require(Capability::ManageCart)?;
        Ok(self.cart.set_quantity(item_id, quantity)?)
    }

    // --- orders ---

    /// Commits the cart as a new order, then empties the cart and switches to
    /// the order history. On failure the cart is left as it was.
    #[instrument(skip(self))]
    pub async fn place_order(&mut self) -> Result<Order, SessionError> {
        let user = self.require(Capability::PlaceOrder)?.clone();
        let order = self
            .orders
            .place_order(
                user.id,
                user.email,
                self.cart.items().to_vec(),
                self.cart.total(),
            )
            .await?;

        self.cart.clear();
        self.router.navigate(Some(user.role), View::MyOrders);
        Ok(order)
    }

    pub async fn my_orders(&self) -> Result<Vec<Order>, SessionError> {
        let user = self.require(Capability::ViewOwnOrders)?;
        Ok(self.orders.list_orders_for_user(user.id.clone()).await?)
    }

    pub async fn all_orders(&self) -> Result<Vec<Order>, SessionError> {
        self.require(Capability::ManageOrders)?;
        Ok(self.orders.list_all_orders().await?)
    }

    pub async fn set_order_status(&self, order_id: &str, status: OrderStatus) -> Result<Order, SessionError> {
        self.require(Capability::ManageOrders)?;
        Ok(self.orders.set_order_status(order_id.to_string(), status).await?)
    }

    // --- catalog management ---

    pub async fn create_menu_item(&self, draft: MenuItemDraft) -> Result<MenuItem, SessionError> {
        self.require(Capability::ManageCatalog)?;
        Ok(self.catalog.create_menu_item(draft).await?)
    }

    pub async fn update_menu_item(&self, item: MenuItem) -> Result<MenuItem, SessionError> {
        self.require(Capability::ManageCatalog)?;
        Ok(self.catalog.update_menu_item(item).await?)
    }

    pub async fn delete_menu_item(&self, item_id: &str) -> Result<(), SessionError> {
        self.require(Capability::ManageCatalog)?;
        Ok(self.catalog.delete_menu_item(item_id.to_string()).await?)
    }
}
