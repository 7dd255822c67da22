use std::sync::Arc;

use tracing::{error, info, instrument};

use super::seed::{demo_menu, demo_orders};
use super::Settings;
use crate::actor_framework::ResourceActor;
use crate::clients::{CatalogClient, OrderClient};
use crate::domain::{MenuItem, Order};
use crate::menu_actor::menu_id_sequence;
use crate::order_actor::order_id_sequence;
use crate::session::{AccountDirectory, Authenticator, Session, SessionGate};

/// Owns the catalog and order store actors and hands out sessions wired to them.
pub struct CanteenSystem {
    pub catalog_client: CatalogClient,
    pub order_client: OrderClient,
    gate: SessionGate,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CanteenSystem {
    /// Starts both stores with the demo accounts as the credential collaborator.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(settings: &Settings) -> Self {
        Self::with_authenticator(settings, Arc::new(AccountDirectory::demo()))
    }

    #[instrument(name = "canteen_system", skip_all)]
    pub fn with_authenticator(settings: &Settings, authenticator: Arc<dyn Authenticator>) -> Self {
        info!(policy = ?settings.transition_policy, seeded = settings.seed_demo_data, "Starting canteen system");

        let (menu_seed, order_seed) = if settings.seed_demo_data {
            (demo_menu(), demo_orders())
        } else {
            (Vec::new(), Vec::new())
        };

        // 1. Catalog store
        let next_menu_id = menu_id_sequence(next_numeric_id(menu_seed.iter().map(|item| item.id.as_str())));
        let (menu_actor, menu_resource_client) =
            ResourceActor::<MenuItem>::new(settings.channel_buffer, next_menu_id);
        let menu_actor = menu_actor.seeded(menu_seed);
        let catalog_client =
            CatalogClient::new(menu_resource_client.with_timeout(settings.request_timeout));
        let menu_handle = tokio::spawn(menu_actor.run());

        // 2. Order store
        let next_order_id = order_id_sequence(next_numeric_id(
            order_seed.iter().filter_map(|order| order.id.strip_prefix("ord")),
        ));
        let (order_actor, order_resource_client) =
            ResourceActor::<Order>::new(settings.channel_buffer, next_order_id);
        let order_actor = order_actor.seeded(order_seed);
        let order_client = OrderClient::new(
            order_resource_client.with_timeout(settings.request_timeout),
            settings.transition_policy,
        );
        let order_handle = tokio::spawn(order_actor.run());

        let gate = SessionGate::new(authenticator, settings.request_timeout);

        info!("Canteen system started");

        Self {
            catalog_client,
            order_client,
            gate,
            handles: vec![menu_handle, order_handle],
        }
    }

    /// A fresh, signed-out session sharing this system's stores.
    pub fn session(&self) -> Session {
        Session::new(
            self.gate.clone(),
            self.catalog_client.clone(),
            self.order_client.clone(),
        )
    }

    /// Stops both stores even if sessions still hold clients, then waits for them.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down canteen system");

        if let Err(e) = self.order_client.shutdown().await {
            error!(error = %e, "Order store already stopped");
        }
        if let Err(e) = self.catalog_client.shutdown().await {
            error!(error = %e, "Catalog store already stopped");
        }

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Store task failed");
                return Err(format!("Store task failed: {e:?}"));
            }
        }

        info!("Canteen system shutdown complete");
        Ok(())
    }
}

/// One past the largest numeric id, or 1 when there is none.
fn next_numeric_id<'a>(ids: impl Iterator<Item = &'a str>) -> u64 {
    ids.filter_map(|id| id.parse::<u64>().ok())
        .max()
        .map_or(1, |max| max + 1)
}
