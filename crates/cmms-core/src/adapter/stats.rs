// ── Service statistics adapter ──

use std::sync::Arc;

use cmms_api::DirectusClient;

use super::{Backend, tags};
use crate::api_call::api_call;
use crate::cache::{CacheTag, TagCache};
use crate::error::CoreError;
use crate::model::{DateRange, ServiceStatus};

#[derive(Clone)]
pub struct StatsAdapter {
    backend: Backend,
}

impl StatsAdapter {
    pub fn new(client: Arc<DirectusClient>, cache: Arc<TagCache>) -> Self {
        Self {
            backend: Backend::new(client, cache),
        }
    }

    /// Service load over `range`, both bounds inclusive.
    pub async fn fetch_service_status(&self, range: DateRange) -> Result<ServiceStatus, CoreError> {
        let client = &self.backend.client;
        let start = range.start.format("%Y-%m-%d").to_string();
        let end = range.end.format("%Y-%m-%d").to_string();
        let tag = CacheTag::family(tags::STATS)
            .child("service_status")
            .child(format!("{start}..{end}"));
        self.backend
            .cache
            .get_or_fetch(tag, || async move {
                let raw = api_call(
                    "fetch_service_status",
                    client.fetch_service_status(&start, &end),
                )
                .await?;
                Ok(ServiceStatus::from(raw))
            })
            .await
    }
}
