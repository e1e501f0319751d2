// ── Machines adapter ──

use std::sync::Arc;

use cmms_api::DirectusClient;

use super::{Backend, tags};
use crate::api_call::api_call;
use crate::cache::{CacheTag, TagCache};
use crate::error::CoreError;
use crate::model::{EntityId, Machine};

/// Read access to the equipment register.
#[derive(Clone)]
pub struct MachinesAdapter {
    backend: Backend,
}

impl MachinesAdapter {
    pub fn new(client: Arc<DirectusClient>, cache: Arc<TagCache>) -> Self {
        Self {
            backend: Backend::new(client, cache),
        }
    }

    /// Every machine, ordered by code.
    pub async fn fetch_machines(&self) -> Result<Vec<Machine>, CoreError> {
        let client = &self.backend.client;
        self.backend
            .cache
            .get_or_fetch(CacheTag::family(tags::MACHINES), || async move {
                let rows = api_call("fetch_machines", client.fetch_machines()).await?;
                Ok(rows.into_iter().map(Machine::from).collect())
            })
            .await
    }

    pub async fn fetch_machine(&self, id: &EntityId) -> Result<Machine, CoreError> {
        let client = &self.backend.client;
        self.backend
            .cache
            .get_or_fetch(CacheTag::family(tags::MACHINES).child(id), || async move {
                let key = id.to_string();
                let row = api_call("fetch_machine", client.fetch_machine(&key)).await?;
                Ok(Machine::from(row))
            })
            .await
    }
}
