// Intervention datasource
//
// `intervention` rows with their machine and status reference expanded,
// plus the `intervention_status_ref` lookup table.

use serde_json::json;
use tracing::debug;

use crate::client::{Auth, DirectusClient};
use crate::error::Error;
use crate::models::{RawIntervention, RawInterventionPatch, RawStatusRef};

use super::{ItemsQuery, eq, with_query};

const INTERVENTION_FIELDS: &[&str] = &[
    "id",
    "code",
    "title",
    "priority",
    "reported_date",
    "closed_date",
    "tech_initials",
    "status_actual.id",
    "status_actual.value",
    "status_actual.label",
    "status_actual.color",
    "machine_id.id",
    "machine_id.code",
    "machine_id.name",
];

const STATUS_FIELDS: &[&str] = &["id", "value", "label", "color"];

/// Domain-level selection of interventions.
#[derive(Debug, Clone, Default)]
pub struct InterventionQuery {
    /// Normalized status value (`"open"`, `"in_progress"`, `"closed"`).
    pub status: Option<String>,
    pub machine_id: Option<String>,
    /// Maximum number of rows; `None` returns all.
    pub limit: Option<u32>,
}

impl DirectusClient {
    /// `GET /items/intervention`, newest first.
    pub async fn fetch_interventions(
        &self,
        query: &InterventionQuery,
    ) -> Result<Vec<RawIntervention>, Error> {
        let mut items = ItemsQuery::new()
            .fields(INTERVENTION_FIELDS)
            .sort("-reported_date")
            .limit(query.limit.map_or(-1, i64::from));
        if let Some(status) = &query.status {
            items = items.filter(json!({ "status_actual": { "value": { "_eq": status } } }));
        }
        if let Some(machine_id) = &query.machine_id {
            items = items.filter(json!({ "machine_id": { "id": { "_eq": machine_id } } }));
        }
        self.get("items/intervention", &items.into_params()).await
    }

    /// `GET /items/intervention/{id}`
    pub async fn fetch_intervention(&self, id: &str) -> Result<RawIntervention, Error> {
        let params = ItemsQuery::new().fields(INTERVENTION_FIELDS).into_params();
        self.get(&self.item_path("intervention", id)?, &params).await
    }

    /// `POST /items/intervention`, returning the created row expanded.
    pub async fn create_intervention(
        &self,
        patch: &RawInterventionPatch,
    ) -> Result<RawIntervention, Error> {
        debug!("creating intervention");
        let params = ItemsQuery::new().fields(INTERVENTION_FIELDS).into_params();
        let path = with_query("items/intervention", &params);
        self.post(&path, patch, Auth::Bearer).await
    }

    /// `PATCH /items/intervention/{id}`
    pub async fn update_intervention(
        &self,
        id: &str,
        patch: &RawInterventionPatch,
    ) -> Result<RawIntervention, Error> {
        debug!(id, "updating intervention");
        let params = ItemsQuery::new().fields(INTERVENTION_FIELDS).into_params();
        let path = with_query(&self.item_path("intervention", id)?, &params);
        self.patch(&path, patch).await
    }

    /// `DELETE /items/intervention/{id}`
    pub async fn delete_intervention(&self, id: &str) -> Result<(), Error> {
        debug!(id, "deleting intervention");
        self.delete(&self.item_path("intervention", id)?).await
    }

    /// `GET /items/intervention_status_ref`
    pub async fn fetch_intervention_statuses(&self) -> Result<Vec<RawStatusRef>, Error> {
        let params = ItemsQuery::new()
            .fields(STATUS_FIELDS)
            .sort("id")
            .limit(-1)
            .into_params();
        self.get("items/intervention_status_ref", &params).await
    }

    /// Status reference rows whose `value` equals `value` (zero or one row).
    pub async fn fetch_intervention_status_by_value(
        &self,
        value: &str,
    ) -> Result<Vec<RawStatusRef>, Error> {
        let params = ItemsQuery::new()
            .fields(STATUS_FIELDS)
            .filter(eq("value", value))
            .limit(1)
            .into_params();
        self.get("items/intervention_status_ref", &params).await
    }
}
