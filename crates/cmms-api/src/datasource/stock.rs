// Stock datasource: `stock_item` rows (spare parts and consumables).

use tracing::debug;

use crate::client::DirectusClient;
use crate::error::Error;
use crate::models::{RawStockItem, RawStockPatch};

use super::{ItemsQuery, with_query};

const STOCK_FIELDS: &[&str] = &[
    "id",
    "ref",
    "name",
    "quantity",
    "min_quantity",
    "unit",
    "location",
];

impl DirectusClient {
    /// `GET /items/stock_item`, sorted by reference.
    pub async fn fetch_stock_items(&self) -> Result<Vec<RawStockItem>, Error> {
        let params = ItemsQuery::new()
            .fields(STOCK_FIELDS)
            .sort("ref")
            .limit(-1)
            .into_params();
        self.get("items/stock_item", &params).await
    }

    /// `GET /items/stock_item/{id}`
    pub async fn fetch_stock_item(&self, id: &str) -> Result<RawStockItem, Error> {
        let params = ItemsQuery::new().fields(STOCK_FIELDS).into_params();
        self.get(&self.item_path("stock_item", id)?, &params).await
    }

    /// `PATCH /items/stock_item/{id}`
    pub async fn update_stock_item(
        &self,
        id: &str,
        patch: &RawStockPatch,
    ) -> Result<RawStockItem, Error> {
        debug!(id, "updating stock item");
        let params = ItemsQuery::new().fields(STOCK_FIELDS).into_params();
        let path = with_query(&self.item_path("stock_item", id)?, &params);
        self.patch(&path, patch).await
    }
}
