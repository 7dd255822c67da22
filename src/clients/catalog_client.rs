use tracing::{debug, info, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{MenuItem, MenuItemDraft};
use crate::menu_actor::CatalogError;

/// Client for the catalog store.
///
/// Does no role checks of its own; callers go through the session gate.
#[derive(Clone)]
pub struct CatalogClient {
    inner: ResourceClient<MenuItem>,
}

impl_basic_client!(CatalogClient, MenuItem, CatalogError, menu_item, menu_items);

impl CatalogClient {
    #[instrument(skip(self, draft), fields(name = %draft.name, price = %draft.price))]
    pub async fn create_menu_item(&self, draft: MenuItemDraft) -> Result<MenuItem, CatalogError> {
        debug!("Sending request");
        let item = self.inner.create(draft).await?;
        info!(item_id = %item.id, "Menu item created");
        Ok(item)
    }

    /// Replaces the stored item with the same id.
    #[instrument(skip(self, item), fields(item_id = %item.id))]
    pub async fn update_menu_item(&self, item: MenuItem) -> Result<MenuItem, CatalogError> {
        debug!("Sending request");
        let id = item.id.clone();
        self.inner.update(id, MenuItemDraft::from(item)).await
    }

    /// Removes the item; deleting an absent id succeeds.
    #[instrument(skip(self))]
    pub async fn delete_menu_item(&self, id: String) -> Result<(), CatalogError> {
        debug!("Sending request");
        if self.inner.delete(id).await? {
            info!("Menu item deleted");
        } else {
            debug!("Menu item already absent");
        }
        Ok(())
    }

    pub async fn shutdown(&self) -> Result<(), CatalogError> {
        self.inner.shutdown().await
    }
}
