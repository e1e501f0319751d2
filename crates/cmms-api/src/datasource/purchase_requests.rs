// Purchase request datasource: `purchase_request` rows raised by
// technicians, optionally tied to an intervention or a stock item.

use tracing::debug;

use crate::client::{Auth, DirectusClient};
use crate::error::Error;
use crate::models::{RawPurchaseRequest, RawPurchaseRequestPatch};

use super::{ItemsQuery, eq, with_query};

const PURCHASE_REQUEST_FIELDS: &[&str] = &[
    "id",
    "item_label",
    "quantity",
    "unit",
    "urgency",
    "status",
    "requested_by",
    "intervention_id",
    "stock_item_id",
    "created_at",
];

impl DirectusClient {
    /// `GET /items/purchase_request`, newest first.
    pub async fn fetch_purchase_requests(
        &self,
        status: Option<&str>,
    ) -> Result<Vec<RawPurchaseRequest>, Error> {
        let mut query = ItemsQuery::new()
            .fields(PURCHASE_REQUEST_FIELDS)
            .sort("-created_at")
            .limit(-1);
        if let Some(status) = status {
            query = query.filter(eq("status", status));
        }
        self.get("items/purchase_request", &query.into_params())
            .await
    }

    /// `GET /items/purchase_request/{id}`
    pub async fn fetch_purchase_request(&self, id: &str) -> Result<RawPurchaseRequest, Error> {
        let params = ItemsQuery::new()
            .fields(PURCHASE_REQUEST_FIELDS)
            .into_params();
        self.get(&self.item_path("purchase_request", id)?, &params)
            .await
    }

    /// `POST /items/purchase_request`
    pub async fn create_purchase_request(
        &self,
        patch: &RawPurchaseRequestPatch,
    ) -> Result<RawPurchaseRequest, Error> {
        debug!("creating purchase request");
        let params = ItemsQuery::new()
            .fields(PURCHASE_REQUEST_FIELDS)
            .into_params();
        let path = with_query("items/purchase_request", &params);
        self.post(&path, patch, Auth::Bearer).await
    }

    /// `PATCH /items/purchase_request/{id}`
    pub async fn update_purchase_request(
        &self,
        id: &str,
        patch: &RawPurchaseRequestPatch,
    ) -> Result<RawPurchaseRequest, Error> {
        debug!(id, "updating purchase request");
        let params = ItemsQuery::new()
            .fields(PURCHASE_REQUEST_FIELDS)
            .into_params();
        let path = with_query(&self.item_path("purchase_request", id)?, &params);
        self.patch(&path, patch).await
    }

    /// `DELETE /items/purchase_request/{id}`
    pub async fn delete_purchase_request(&self, id: &str) -> Result<(), Error> {
        debug!(id, "deleting purchase request");
        self.delete(&self.item_path("purchase_request", id)?).await
    }
}
