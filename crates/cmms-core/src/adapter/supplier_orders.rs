// ── Supplier orders adapter ──

use std::sync::Arc;

use cmms_api::DirectusClient;

use super::{Backend, tags};
use crate::api_call::api_call;
use crate::cache::{CacheTag, TagCache};
use crate::convert::map_supplier_order_domain_to_backend;
use crate::error::CoreError;
use crate::model::{EntityId, SupplierOrder, SupplierOrderStatus, SupplierOrderUpdate};

#[derive(Clone)]
pub struct SupplierOrdersAdapter {
    backend: Backend,
}

impl SupplierOrdersAdapter {
    pub fn new(client: Arc<DirectusClient>, cache: Arc<TagCache>) -> Self {
        Self {
            backend: Backend::new(client, cache),
        }
    }

    /// Supplier orders, most recently placed first.
    pub async fn fetch_supplier_orders(
        &self,
        status: Option<SupplierOrderStatus>,
    ) -> Result<Vec<SupplierOrder>, CoreError> {
        let client = &self.backend.client;
        let status: Option<&'static str> = status.map(Into::into);
        let tag = CacheTag::family(tags::SUPPLIER_ORDERS)
            .child("status")
            .child(status.unwrap_or("all"));
        self.backend
            .cache
            .get_or_fetch(tag, || async move {
                let rows = api_call(
                    "fetch_supplier_orders",
                    client.fetch_supplier_orders(status),
                )
                .await?;
                Ok(rows.into_iter().map(SupplierOrder::from).collect())
            })
            .await
    }

    pub async fn fetch_supplier_order(&self, id: &EntityId) -> Result<SupplierOrder, CoreError> {
        let client = &self.backend.client;
        self.backend
            .cache
            .get_or_fetch(CacheTag::family(tags::SUPPLIER_ORDERS).child(id), || async move {
                let key = id.to_string();
                let row =
                    api_call("fetch_supplier_order", client.fetch_supplier_order(&key)).await?;
                Ok(SupplierOrder::from(row))
            })
            .await
    }

    pub async fn update_supplier_order(
        &self,
        id: &EntityId,
        update: &SupplierOrderUpdate,
    ) -> Result<SupplierOrder, CoreError> {
        let key = id.to_string();
        let patch = map_supplier_order_domain_to_backend(update);
        let result = api_call(
            "update_supplier_order",
            self.backend.client.update_supplier_order(&key, &patch),
        )
        .await;

        self.backend.invalidate_item(tags::SUPPLIER_ORDERS, id);
        // Receiving an order changes what is on the shelves.
        if update.status == Some(SupplierOrderStatus::Received) {
            self.backend.cache.invalidate(tags::STOCK);
        }
        Ok(SupplierOrder::from(result?))
    }
}
