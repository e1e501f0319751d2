// ── Preventive maintenance adapter ──
//
// Suggestions are produced by the backend; this side only lists them and
// records how each one was handled.

use std::sync::Arc;

use chrono::Utc;
use cmms_api::DirectusClient;

use super::{Backend, tags};
use crate::api_call::api_call;
use crate::cache::{CacheTag, TagCache};
use crate::convert::map_suggestion_domain_to_backend;
use crate::error::CoreError;
use crate::model::{EntityId, PreventiveSuggestion, SuggestionDecision, SuggestionStatus};

#[derive(Clone)]
pub struct PreventiveAdapter {
    backend: Backend,
}

impl PreventiveAdapter {
    pub fn new(client: Arc<DirectusClient>, cache: Arc<TagCache>) -> Self {
        Self {
            backend: Backend::new(client, cache),
        }
    }

    /// Suggestions, highest score first, optionally restricted to one status.
    pub async fn fetch_suggestions(
        &self,
        status: Option<SuggestionStatus>,
    ) -> Result<Vec<PreventiveSuggestion>, CoreError> {
        let client = &self.backend.client;
        let tag = CacheTag::family(tags::SUGGESTIONS)
            .child("status")
            .child(status.map_or("all", SuggestionStatus::backend_value));
        self.backend
            .cache
            .get_or_fetch(tag, || async move {
                let rows = api_call(
                    "fetch_suggestions",
                    client.fetch_suggestions(status.map(SuggestionStatus::backend_value)),
                )
                .await?;
                Ok(rows.into_iter().map(PreventiveSuggestion::from).collect())
            })
            .await
    }

    pub async fn accept_suggestion(
        &self,
        id: &EntityId,
        handled_by: Option<EntityId>,
    ) -> Result<PreventiveSuggestion, CoreError> {
        self.decide("accept_suggestion", id, SuggestionStatus::Accepted, handled_by)
            .await
    }

    pub async fn reject_suggestion(
        &self,
        id: &EntityId,
        handled_by: Option<EntityId>,
    ) -> Result<PreventiveSuggestion, CoreError> {
        self.decide("reject_suggestion", id, SuggestionStatus::Rejected, handled_by)
            .await
    }

    /// Mark a suggestion as seen without deciding on it.
    pub async fn review_suggestion(
        &self,
        id: &EntityId,
        handled_by: Option<EntityId>,
    ) -> Result<PreventiveSuggestion, CoreError> {
        self.decide("review_suggestion", id, SuggestionStatus::Reviewed, handled_by)
            .await
    }

    async fn decide(
        &self,
        operation: &'static str,
        id: &EntityId,
        status: SuggestionStatus,
        handled_by: Option<EntityId>,
    ) -> Result<PreventiveSuggestion, CoreError> {
        let decision = SuggestionDecision {
            status,
            handled_at: Some(Utc::now()),
            handled_by,
        };
        let patch = map_suggestion_domain_to_backend(&decision);
        let key = id.to_string();
        let result = api_call(
            operation,
            self.backend.client.update_suggestion(&key, &patch),
        )
        .await;

        self.backend.invalidate_item(tags::SUGGESTIONS, id);
        Ok(PreventiveSuggestion::from(result?))
    }
}
