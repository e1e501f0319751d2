// ── Purchase requests adapter ──

use std::sync::Arc;

use cmms_api::DirectusClient;

use super::{Backend, tags};
use crate::api_call::api_call;
use crate::cache::{CacheTag, TagCache};
use crate::convert::map_purchase_request_domain_to_backend;
use crate::error::CoreError;
use crate::model::{EntityId, PurchaseRequest, PurchaseRequestStatus, PurchaseRequestUpdate};

#[derive(Clone)]
pub struct PurchaseRequestsAdapter {
    backend: Backend,
}

impl PurchaseRequestsAdapter {
    pub fn new(client: Arc<DirectusClient>, cache: Arc<TagCache>) -> Self {
        Self {
            backend: Backend::new(client, cache),
        }
    }

    /// Purchase requests, newest first, optionally restricted to one status.
    pub async fn fetch_purchase_requests(
        &self,
        status: Option<PurchaseRequestStatus>,
    ) -> Result<Vec<PurchaseRequest>, CoreError> {
        let client = &self.backend.client;
        let status: Option<&'static str> = status.map(Into::into);
        let tag = CacheTag::family(tags::PURCHASE_REQUESTS)
            .child("status")
            .child(status.unwrap_or("all"));
        self.backend
            .cache
            .get_or_fetch(tag, || async move {
                let rows = api_call(
                    "fetch_purchase_requests",
                    client.fetch_purchase_requests(status),
                )
                .await?;
                Ok(rows.into_iter().map(PurchaseRequest::from).collect())
            })
            .await
    }

    pub async fn fetch_purchase_request(
        &self,
        id: &EntityId,
    ) -> Result<PurchaseRequest, CoreError> {
        let client = &self.backend.client;
        self.backend
            .cache
            .get_or_fetch(CacheTag::family(tags::PURCHASE_REQUESTS).child(id), || async move {
                let key = id.to_string();
                let row = api_call(
                    "fetch_purchase_request",
                    client.fetch_purchase_request(&key),
                )
                .await?;
                Ok(PurchaseRequest::from(row))
            })
            .await
    }

    pub async fn create_purchase_request(
        &self,
        request: &PurchaseRequestUpdate,
    ) -> Result<PurchaseRequest, CoreError> {
        let patch = map_purchase_request_domain_to_backend(request);
        let created = api_call(
            "create_purchase_request",
            self.backend.client.create_purchase_request(&patch),
        )
        .await
        .map(PurchaseRequest::from);

        self.backend.cache.invalidate(tags::PURCHASE_REQUESTS);
        created
    }

    pub async fn update_purchase_request(
        &self,
        id: &EntityId,
        update: &PurchaseRequestUpdate,
    ) -> Result<PurchaseRequest, CoreError> {
        let key = id.to_string();
        let patch = map_purchase_request_domain_to_backend(update);
        let result = api_call(
            "update_purchase_request",
            self.backend.client.update_purchase_request(&key, &patch),
        )
        .await;

        self.backend.invalidate_item(tags::PURCHASE_REQUESTS, id);
        Ok(PurchaseRequest::from(result?))
    }

    pub async fn delete_purchase_request(&self, id: &EntityId) -> Result<(), CoreError> {
        let key = id.to_string();
        let result = api_call(
            "delete_purchase_request",
            self.backend.client.delete_purchase_request(&key),
        )
        .await;

        self.backend.invalidate_item(tags::PURCHASE_REQUESTS, id);
        result
    }
}
