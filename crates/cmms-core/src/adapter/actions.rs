// ── Intervention actions adapter ──
//
// Action lists are cached per intervention under `actions:{intervention}`.
// Any action write also drops the statistics, which aggregate action time.

use std::sync::Arc;

use cmms_api::DirectusClient;

use super::{Backend, tags};
use crate::api_call::api_call;
use crate::cache::{CacheTag, TagCache};
use crate::convert::map_action_domain_to_backend;
use crate::error::CoreError;
use crate::model::{ActionUpdate, EntityId, InterventionAction};

#[derive(Clone)]
pub struct ActionsAdapter {
    backend: Backend,
}

impl ActionsAdapter {
    pub fn new(client: Arc<DirectusClient>, cache: Arc<TagCache>) -> Self {
        Self {
            backend: Backend::new(client, cache),
        }
    }

    fn invalidate_after_write(&self, intervention_id: Option<&EntityId>) {
        match intervention_id {
            Some(id) => self.backend.invalidate_item(tags::ACTIONS, id),
            None => {
                self.backend.cache.invalidate(tags::ACTIONS);
            }
        }
        self.backend.cache.invalidate(tags::STATS);
    }

    /// Actions logged against one intervention, oldest first.
    pub async fn fetch_actions(
        &self,
        intervention_id: &EntityId,
    ) -> Result<Vec<InterventionAction>, CoreError> {
        let client = &self.backend.client;
        let tag = CacheTag::family(tags::ACTIONS).child(intervention_id);
        self.backend
            .cache
            .get_or_fetch(tag, || async move {
                let key = intervention_id.to_string();
                let rows = api_call("fetch_actions", client.fetch_actions(&key)).await?;
                Ok(rows.into_iter().map(InterventionAction::from).collect())
            })
            .await
    }

    pub async fn create_action(
        &self,
        action: &ActionUpdate,
    ) -> Result<InterventionAction, CoreError> {
        let patch = map_action_domain_to_backend(action);
        let created = api_call("create_action", self.backend.client.create_action(&patch))
            .await
            .map(InterventionAction::from);

        let owner = created
            .as_ref()
            .ok()
            .and_then(|a| a.intervention_id.as_ref())
            .or(action.intervention_id.as_ref());
        self.invalidate_after_write(owner);
        created
    }

    pub async fn update_action(
        &self,
        id: &EntityId,
        update: &ActionUpdate,
    ) -> Result<InterventionAction, CoreError> {
        let key = id.to_string();
        let patch = map_action_domain_to_backend(update);
        let updated = api_call(
            "update_action",
            self.backend.client.update_action(&key, &patch),
        )
        .await
        .map(InterventionAction::from);

        match &updated {
            // A move to another intervention changes two lists.
            Ok(action) if update.intervention_id.is_none() => {
                self.invalidate_after_write(action.intervention_id.as_ref());
            }
            _ => self.invalidate_after_write(None),
        }
        updated
    }

    /// Delete an action. The owning intervention is not known here, so
    /// every cached action list is dropped.
    pub async fn delete_action(&self, id: &EntityId) -> Result<(), CoreError> {
        let key = id.to_string();
        let result = api_call("delete_action", self.backend.client.delete_action(&key)).await;
        self.invalidate_after_write(None);
        result
    }
}
