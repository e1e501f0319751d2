// Supplier order datasource: `supplier_order` rows with the supplier
// expanded and line ids for counting.

use tracing::debug;

use crate::client::DirectusClient;
use crate::error::Error;
use crate::models::{RawSupplierOrder, RawSupplierOrderPatch};

use super::{ItemsQuery, eq, with_query};

const SUPPLIER_ORDER_FIELDS: &[&str] = &[
    "id",
    "order_number",
    "status",
    "total_amount",
    "ordered_at",
    "received_at",
    "lines",
    "supplier_id.id",
    "supplier_id.name",
];

impl DirectusClient {
    /// `GET /items/supplier_order`, newest first.
    pub async fn fetch_supplier_orders(
        &self,
        status: Option<&str>,
    ) -> Result<Vec<RawSupplierOrder>, Error> {
        let mut query = ItemsQuery::new()
            .fields(SUPPLIER_ORDER_FIELDS)
            .sort("-ordered_at")
            .limit(-1);
        if let Some(status) = status {
            query = query.filter(eq("status", status));
        }
        self.get("items/supplier_order", &query.into_params()).await
    }

    /// `GET /items/supplier_order/{id}`
    pub async fn fetch_supplier_order(&self, id: &str) -> Result<RawSupplierOrder, Error> {
        let params = ItemsQuery::new()
            .fields(SUPPLIER_ORDER_FIELDS)
            .into_params();
        self.get(&self.item_path("supplier_order", id)?, &params)
            .await
    }

    /// `PATCH /items/supplier_order/{id}`
    pub async fn update_supplier_order(
        &self,
        id: &str,
        patch: &RawSupplierOrderPatch,
    ) -> Result<RawSupplierOrder, Error> {
        debug!(id, "updating supplier order");
        let params = ItemsQuery::new()
            .fields(SUPPLIER_ORDER_FIELDS)
            .into_params();
        let path = with_query(&self.item_path("supplier_order", id)?, &params);
        self.patch(&path, patch).await
    }
}
