// Service statistics datasource: the `/stats/service-status` endpoint
// extension aggregates action time over a date window.

use crate::client::DirectusClient;
use crate::error::Error;
use crate::models::RawServiceStatus;

impl DirectusClient {
    /// `GET /stats/service-status?start={start}&end={end}`
    ///
    /// Dates are ISO-8601 calendar dates (`YYYY-MM-DD`), both inclusive.
    pub async fn fetch_service_status(
        &self,
        start: &str,
        end: &str,
    ) -> Result<RawServiceStatus, Error> {
        let params = [("start", start.to_owned()), ("end", end.to_owned())];
        self.get("stats/service-status", &params).await
    }
}
