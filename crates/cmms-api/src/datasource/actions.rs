// Intervention action datasource: time-tracked work logged against an
// intervention, with its subcategory expanded.

use tracing::debug;

use crate::client::{Auth, DirectusClient};
use crate::error::Error;
use crate::models::{RawAction, RawActionPatch};

use super::{ItemsQuery, eq, with_query};

const ACTION_FIELDS: &[&str] = &[
    "id",
    "intervention_id",
    "description",
    "time_spent",
    "tech",
    "created_at",
    "action_subcategory.id",
    "action_subcategory.code",
    "action_subcategory.name",
];

impl DirectusClient {
    /// Actions of one intervention, oldest first.
    ///
    /// `GET /items/intervention_action?filter[intervention_id][_eq]={id}`
    pub async fn fetch_actions(&self, intervention_id: &str) -> Result<Vec<RawAction>, Error> {
        let params = ItemsQuery::new()
            .fields(ACTION_FIELDS)
            .filter(eq("intervention_id", intervention_id))
            .sort("created_at")
            .limit(-1)
            .into_params();
        self.get("items/intervention_action", &params).await
    }

    /// `POST /items/intervention_action`
    pub async fn create_action(&self, patch: &RawActionPatch) -> Result<RawAction, Error> {
        debug!("creating intervention action");
        let params = ItemsQuery::new().fields(ACTION_FIELDS).into_params();
        let path = with_query("items/intervention_action", &params);
        self.post(&path, patch, Auth::Bearer).await
    }

    /// `PATCH /items/intervention_action/{id}`
    pub async fn update_action(
        &self,
        id: &str,
        patch: &RawActionPatch,
    ) -> Result<RawAction, Error> {
        debug!(id, "updating intervention action");
        let params = ItemsQuery::new().fields(ACTION_FIELDS).into_params();
        let path = with_query(&self.item_path("intervention_action", id)?, &params);
        self.patch(&path, patch).await
    }

    /// `DELETE /items/intervention_action/{id}`
    pub async fn delete_action(&self, id: &str) -> Result<(), Error> {
        debug!(id, "deleting intervention action");
        self.delete(&self.item_path("intervention_action", id)?).await
    }
}
