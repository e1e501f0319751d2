// Machine datasource: read-only access to the `machine` collection.

use crate::client::DirectusClient;
use crate::error::Error;
use crate::models::RawMachine;

use super::ItemsQuery;

pub(crate) const MACHINE_FIELDS: &[&str] =
    &["id", "code", "name", "location", "parent_id", "status"];

impl DirectusClient {
    /// `GET /items/machine`, sorted by code.
    pub async fn fetch_machines(&self) -> Result<Vec<RawMachine>, Error> {
        let params = ItemsQuery::new()
            .fields(MACHINE_FIELDS)
            .sort("code")
            .limit(-1)
            .into_params();
        self.get("items/machine", &params).await
    }

    /// `GET /items/machine/{id}`
    pub async fn fetch_machine(&self, id: &str) -> Result<RawMachine, Error> {
        let params = ItemsQuery::new().fields(MACHINE_FIELDS).into_params();
        self.get(&self.item_path("machine", id)?, &params).await
    }
}
