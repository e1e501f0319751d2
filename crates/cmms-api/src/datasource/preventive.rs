// Preventive suggestion datasource
//
// Suggestions are produced backend-side from action history; the client
// only lists them and records how they were handled.

use tracing::debug;

use crate::client::DirectusClient;
use crate::error::Error;
use crate::models::{RawPreventiveSuggestion, RawSuggestionPatch};

use super::{ItemsQuery, eq, with_query};

const SUGGESTION_FIELDS: &[&str] = &[
    "id",
    "preventive_code",
    "preventive_label",
    "score",
    "status",
    "detected_at",
    "handled_at",
    "handled_by",
    "intervention_action_id",
    "machine_id.id",
    "machine_id.code",
    "machine_id.name",
];

impl DirectusClient {
    /// Suggestions, highest score first. `status` is the backend value
    /// (`"NEW"`, `"ACCEPTED"`, ...).
    ///
    /// `GET /items/preventive_suggestion`
    pub async fn fetch_suggestions(
        &self,
        status: Option<&str>,
    ) -> Result<Vec<RawPreventiveSuggestion>, Error> {
        let mut query = ItemsQuery::new()
            .fields(SUGGESTION_FIELDS)
            .sort("-score")
            .limit(-1);
        if let Some(status) = status {
            query = query.filter(eq("status", status));
        }
        self.get("items/preventive_suggestion", &query.into_params())
            .await
    }

    /// `PATCH /items/preventive_suggestion/{id}`
    pub async fn update_suggestion(
        &self,
        id: &str,
        patch: &RawSuggestionPatch,
    ) -> Result<RawPreventiveSuggestion, Error> {
        debug!(id, status = ?patch.status, "updating preventive suggestion");
        let params = ItemsQuery::new().fields(SUGGESTION_FIELDS).into_params();
        let path = with_query(&self.item_path("preventive_suggestion", id)?, &params);
        self.patch(&path, patch).await
    }
}
