// Auth datasource
//
// Token exchange against `/auth/*` and the current-user lookup. Login and
// refresh go out without the stored bearer: a stale token would make the
// backend reject an otherwise valid credential exchange.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use crate::client::{Auth, DirectusClient};
use crate::error::Error;
use crate::models::{RawAuthTokens, RawUser};

use super::ItemsQuery;

const USER_FIELDS: &[&str] = &[
    "id",
    "email",
    "first_name",
    "last_name",
    "role.id",
    "role.name",
];

impl DirectusClient {
    /// Exchange credentials for a token pair.
    ///
    /// `POST /auth/login`
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<RawAuthTokens, Error> {
        debug!(email, "logging in");
        let body = json!({
            "email": email,
            "password": password.expose_secret(),
        });
        self.post("auth/login", &body, Auth::Anonymous).await
    }

    /// Exchange a refresh token for a new token pair.
    ///
    /// `POST /auth/refresh` in JSON mode.
    pub async fn refresh(&self, refresh_token: &SecretString) -> Result<RawAuthTokens, Error> {
        debug!("refreshing access token");
        let body = json!({
            "refresh_token": refresh_token.expose_secret(),
            "mode": "json",
        });
        self.post("auth/refresh", &body, Auth::Anonymous).await
    }

    /// Revoke a refresh token server-side.
    ///
    /// `POST /auth/logout`
    pub async fn logout(&self, refresh_token: &SecretString) -> Result<(), Error> {
        debug!("logging out");
        let body = json!({ "refresh_token": refresh_token.expose_secret() });
        self.post_no_response("auth/logout", &body, Auth::Anonymous)
            .await
    }

    /// The user owning the stored access token, with its role expanded.
    ///
    /// `GET /users/me`
    pub async fn fetch_current_user(&self) -> Result<RawUser, Error> {
        let params = ItemsQuery::new().fields(USER_FIELDS).into_params();
        self.get("users/me", &params).await
    }
}
