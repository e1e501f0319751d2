// ── Auth adapter ──
//
// Owns the session lifecycle: anonymous -> login -> authenticated ->
// logout (or token clearing) -> anonymous. This is the only writer of the
// token store. Cached responses are dropped on every transition since
// they were fetched under another identity.

use std::sync::Arc;

use chrono::Utc;
use secrecy::SecretString;
use tracing::{debug, warn};

use cmms_api::{DirectusClient, TokenKey, TokenStore};

use super::Backend;
use crate::api_call::api_call;
use crate::cache::TagCache;
use crate::error::CoreError;
use crate::model::{AuthTokens, AuthUser};

#[derive(Clone)]
pub struct AuthAdapter {
    backend: Backend,
}

fn write_tokens(store: &dyn TokenStore, tokens: &AuthTokens) -> Result<(), cmms_api::Error> {
    store.set(TokenKey::AccessToken, tokens.access_token.clone())?;
    match &tokens.refresh_token {
        Some(refresh) => store.set(TokenKey::RefreshToken, refresh.clone())?,
        None => store.remove(TokenKey::RefreshToken)?,
    }
    store.set(
        TokenKey::LoginTimestamp,
        SecretString::from(Utc::now().to_rfc3339()),
    )
}

/// Write a fresh token pair and login timestamp. On failure nothing is
/// left behind.
fn persist(store: &dyn TokenStore, tokens: &AuthTokens) -> Result<(), cmms_api::Error> {
    let written = write_tokens(store, tokens);
    if written.is_err() {
        if let Err(e) = store.clear() {
            warn!(error = %e, "could not roll back partially written tokens");
        }
    }
    written
}

impl AuthAdapter {
    pub fn new(client: Arc<DirectusClient>, cache: Arc<TagCache>) -> Self {
        Self {
            backend: Backend::new(client, cache),
        }
    }

    fn store(&self) -> &dyn TokenStore {
        self.backend.client.tokens().as_ref()
    }

    /// Exchange credentials for tokens and persist them.
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthTokens, CoreError> {
        let email = email.trim();
        let client = &self.backend.client;
        let tokens = api_call("login", async {
            let tokens = AuthTokens::from(client.login(email, password).await?);
            persist(self.store(), &tokens)?;
            Ok(tokens)
        })
        .await?;

        self.backend.cache.clear();
        debug!(email, "logged in");
        Ok(tokens)
    }

    /// End the session. The backend is told when a refresh token exists,
    /// but local tokens are cleared whatever it answers.
    pub async fn logout(&self) -> Result<(), CoreError> {
        let client = &self.backend.client;
        let refresh = self.store().get(TokenKey::RefreshToken);
        let result = api_call("logout", async {
            if let Some(refresh) = &refresh {
                if let Err(e) = client.logout(refresh).await {
                    warn!(error = %e, "backend logout failed (local session cleared anyway)");
                }
            }
            self.store().clear()
        })
        .await;

        self.backend.cache.clear();
        debug!("logged out");
        result
    }

    /// Trade the stored refresh token for a new pair.
    pub async fn refresh(&self) -> Result<AuthTokens, CoreError> {
        let client = &self.backend.client;
        api_call("refresh", async {
            let refresh = self
                .store()
                .get(TokenKey::RefreshToken)
                .ok_or(cmms_api::Error::MissingToken {
                    key: TokenKey::RefreshToken.label(),
                })?;
            let tokens = AuthTokens::from(client.refresh(&refresh).await?);
            persist(self.store(), &tokens)?;
            Ok(tokens)
        })
        .await
    }

    /// `true` when an access token is stored. Does not contact the backend.
    pub fn is_authenticated(&self) -> bool {
        self.store().get(TokenKey::AccessToken).is_some()
    }

    pub async fn get_current_user(&self) -> Result<AuthUser, CoreError> {
        let raw = api_call(
            "get_current_user",
            self.backend.client.fetch_current_user(),
        )
        .await?;
        Ok(AuthUser::from(raw))
    }
}
