// ── Interventions adapter ──
//
// Intervention CRUD plus the status reference table. Status writes go out
// as the key of the matching reference row, falling back to the status
// value itself when the table has no such row.

use std::sync::Arc;

use cmms_api::models::RawInterventionPatch;
use cmms_api::{DirectusClient, InterventionQuery};

use super::{Backend, tags};
use crate::api_call::api_call;
use crate::cache::{CacheTag, TagCache};
use crate::convert::map_intervention_domain_to_backend;
use crate::error::CoreError;
use crate::model::{
    EntityId, Intervention, InterventionFilter, InterventionStatus, InterventionStatusRef,
    InterventionUpdate,
};

#[derive(Clone)]
pub struct InterventionsAdapter {
    backend: Backend,
}

fn query_tag(filter: &InterventionFilter) -> CacheTag {
    let status = filter.status.map_or("any", |s| s.into());
    let machine = filter
        .machine_id
        .as_ref()
        .map_or_else(|| "any".to_owned(), ToString::to_string);
    let limit = filter
        .limit
        .map_or_else(|| "all".to_owned(), |n| n.to_string());
    CacheTag::family(tags::INTERVENTIONS)
        .child("query")
        .child(format!("status={status},machine={machine},limit={limit}"))
}

/// Key to write into `status_actual` for `status`.
async fn status_key(
    client: &DirectusClient,
    status: InterventionStatus,
) -> Result<String, cmms_api::Error> {
    let rows = client
        .fetch_intervention_status_by_value(status.as_ref())
        .await?;
    Ok(rows
        .into_iter()
        .next()
        .and_then(|row| row.id)
        .map_or_else(|| status.as_ref().to_owned(), |id| id.to_key()))
}

/// Backend patch for `update`, with the status resolved to its row key.
async fn backend_patch(
    client: &DirectusClient,
    update: &InterventionUpdate,
) -> Result<RawInterventionPatch, cmms_api::Error> {
    let mut patch = map_intervention_domain_to_backend(update);
    if let Some(status) = update.status {
        patch.status_actual = Some(status_key(client, status).await?);
    }
    Ok(patch)
}

impl InterventionsAdapter {
    pub fn new(client: Arc<DirectusClient>, cache: Arc<TagCache>) -> Self {
        Self {
            backend: Backend::new(client, cache),
        }
    }

    /// Interventions matching `filter`, most recently reported first.
    pub async fn fetch_interventions(
        &self,
        filter: &InterventionFilter,
    ) -> Result<Vec<Intervention>, CoreError> {
        let client = &self.backend.client;
        let query = InterventionQuery {
            status: filter.status.map(|s| s.as_ref().to_owned()),
            machine_id: filter.machine_id.as_ref().map(ToString::to_string),
            limit: filter.limit,
        };
        self.backend
            .cache
            .get_or_fetch(query_tag(filter), || async move {
                let rows =
                    api_call("fetch_interventions", client.fetch_interventions(&query)).await?;
                Ok(rows.into_iter().map(Intervention::from).collect())
            })
            .await
    }

    pub async fn fetch_intervention(&self, id: &EntityId) -> Result<Intervention, CoreError> {
        let client = &self.backend.client;
        self.backend
            .cache
            .get_or_fetch(CacheTag::family(tags::INTERVENTIONS).child(id), || async move {
                let key = id.to_string();
                let row = api_call("fetch_intervention", client.fetch_intervention(&key)).await?;
                Ok(Intervention::from(row))
            })
            .await
    }

    pub async fn create_intervention(
        &self,
        intervention: &InterventionUpdate,
    ) -> Result<Intervention, CoreError> {
        let client = &self.backend.client;
        let created = api_call("create_intervention", async {
            let patch = backend_patch(client, intervention).await?;
            client.create_intervention(&patch).await
        })
        .await
        .map(Intervention::from);

        self.backend.cache.invalidate(tags::INTERVENTIONS);
        created
    }

    /// Apply the supplied fields of `update`; absent fields are left as is.
    pub async fn update_intervention(
        &self,
        id: &EntityId,
        update: &InterventionUpdate,
    ) -> Result<Intervention, CoreError> {
        let client = &self.backend.client;
        let key = id.to_string();
        let result = api_call("update_intervention", async {
            let patch = backend_patch(client, update).await?;
            client.update_intervention(&key, &patch).await
        })
        .await;

        self.backend.invalidate_item(tags::INTERVENTIONS, id);
        Ok(Intervention::from(result?))
    }

    pub async fn update_intervention_status(
        &self,
        id: &EntityId,
        status: InterventionStatus,
    ) -> Result<Intervention, CoreError> {
        let client = &self.backend.client;
        let key = id.to_string();
        let result = api_call("update_intervention_status", async {
            let patch = RawInterventionPatch {
                status_actual: Some(status_key(client, status).await?),
                ..RawInterventionPatch::default()
            };
            client.update_intervention(&key, &patch).await
        })
        .await;

        self.backend.invalidate_item(tags::INTERVENTIONS, id);
        Ok(Intervention::from(result?))
    }

    pub async fn delete_intervention(&self, id: &EntityId) -> Result<(), CoreError> {
        let key = id.to_string();
        let result = api_call(
            "delete_intervention",
            self.backend.client.delete_intervention(&key),
        )
        .await;

        self.backend.invalidate_item(tags::INTERVENTIONS, id);
        // Actions hang off the deleted intervention.
        self.backend.cache.invalidate(tags::ACTIONS);
        result
    }

    /// Rows of the status reference table.
    pub async fn fetch_intervention_statuses(
        &self,
    ) -> Result<Vec<InterventionStatusRef>, CoreError> {
        let client = &self.backend.client;
        self.backend
            .cache
            .get_or_fetch(CacheTag::family(tags::INTERVENTION_STATUSES), || async move {
                let rows = api_call(
                    "fetch_intervention_statuses",
                    client.fetch_intervention_statuses(),
                )
                .await?;
                Ok(rows.into_iter().map(InterventionStatusRef::from).collect())
            })
            .await
    }

    /// The reference row for `value`, or `None` when the table has none.
    pub async fn fetch_intervention_status_by_value(
        &self,
        value: &str,
    ) -> Result<Option<InterventionStatusRef>, CoreError> {
        let rows = api_call(
            "fetch_intervention_status_by_value",
            self.backend.client.fetch_intervention_status_by_value(value),
        )
        .await?;
        Ok(rows.into_iter().next().map(InterventionStatusRef::from))
    }
}
