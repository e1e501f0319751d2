// ── Stock adapter ──

use std::sync::Arc;

use cmms_api::DirectusClient;

use super::{Backend, tags};
use crate::api_call::api_call;
use crate::cache::{CacheTag, TagCache};
use crate::convert::map_stock_domain_to_backend;
use crate::error::CoreError;
use crate::model::{EntityId, StockItem, StockUpdate};

#[derive(Clone)]
pub struct StockAdapter {
    backend: Backend,
}

impl StockAdapter {
    pub fn new(client: Arc<DirectusClient>, cache: Arc<TagCache>) -> Self {
        Self {
            backend: Backend::new(client, cache),
        }
    }

    pub async fn fetch_stock_items(&self) -> Result<Vec<StockItem>, CoreError> {
        let client = &self.backend.client;
        self.backend
            .cache
            .get_or_fetch(CacheTag::family(tags::STOCK), || async move {
                let rows = api_call("fetch_stock_items", client.fetch_stock_items()).await?;
                Ok(rows.into_iter().map(StockItem::from).collect())
            })
            .await
    }

    pub async fn fetch_stock_item(&self, id: &EntityId) -> Result<StockItem, CoreError> {
        let client = &self.backend.client;
        self.backend
            .cache
            .get_or_fetch(CacheTag::family(tags::STOCK).child(id), || async move {
                let key = id.to_string();
                let row = api_call("fetch_stock_item", client.fetch_stock_item(&key)).await?;
                Ok(StockItem::from(row))
            })
            .await
    }

    /// Set the on-hand quantity, threshold or location of an item.
    pub async fn adjust_stock(
        &self,
        id: &EntityId,
        adjustment: &StockUpdate,
    ) -> Result<StockItem, CoreError> {
        let key = id.to_string();
        let patch = map_stock_domain_to_backend(adjustment);
        let result = api_call(
            "adjust_stock",
            self.backend.client.update_stock_item(&key, &patch),
        )
        .await;

        self.backend.invalidate_item(tags::STOCK, id);
        Ok(StockItem::from(result?))
    }
}
