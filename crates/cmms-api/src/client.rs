// Directus HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, bearer authorization from
// the token store, `{ data }` envelope unwrapping and `{ errors }` parsing.
// Endpoint methods (the datasources) live in `crate::datasource::*` as
// inherent impls to keep this module focused on transport mechanics.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{RequestBuilder, Response, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::auth::{TokenKey, TokenStore};
use crate::error::Error;
use crate::models::{Envelope, ErrorEnvelope};
use crate::transport::TransportConfig;

/// Whether a request carries the stored access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Auth {
    Bearer,
    Anonymous,
}

/// Raw HTTP client for the Directus REST API.
///
/// All methods return the unwrapped `data` payload -- the envelope is
/// stripped before the caller sees it. Non-2xx responses become
/// [`Error::Api`], timeouts become [`Error::Timeout`].
pub struct DirectusClient {
    http: reqwest::Client,
    base_url: Url,
    tokens: Arc<dyn TokenStore>,
    timeout: Duration,
}

impl DirectusClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the Directus root (e.g. `https://cmms.example.com` or
    /// `https://example.com/directus`).
    pub fn new(
        base_url: Url,
        tokens: Arc<dyn TokenStore>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url),
            tokens,
            timeout: transport.timeout,
        })
    }

    /// Wrap a pre-built `reqwest::Client`.
    ///
    /// `timeout` must be the ceiling `http` was built with; it is what
    /// [`Error::Timeout`] reports.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        tokens: Arc<dyn TokenStore>,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            base_url: normalize_base_url(base_url),
            tokens,
            timeout,
        }
    }

    /// The backend base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The token store consulted for bearer authorization.
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"items/intervention"`) onto the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Relative path of one item, `items/{collection}/{id}`.
    ///
    /// `id` always stays a single segment: `/`, `?`, `#` and `%` are
    /// percent-encoded, and ids that would resolve away (`""`, `.`, `..`)
    /// are rejected.
    pub(crate) fn item_path(&self, collection: &str, id: &str) -> Result<String, Error> {
        let invalid = || Error::InvalidId { id: id.to_owned() };
        if matches!(id, "" | "." | "..") {
            return Err(invalid());
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| invalid())?
            .pop_if_empty()
            .extend(["items", collection, id]);
        url.path()
            .strip_prefix(self.base_url.path())
            .map(str::to_owned)
            .ok_or_else(invalid)
    }

    // ── Request helpers ──────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let builder = self.http.get(url).query(params);
        let resp = self.send(builder, Auth::Bearer).await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        auth: Auth,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let builder = self.http.post(url).json(body);
        let resp = self.send(builder, auth).await?;
        self.handle_response(resp).await
    }

    /// POST whose response has no body (e.g. `204 No Content`).
    pub(crate) async fn post_no_response<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        auth: Auth,
    ) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let builder = self.http.post(url).json(body);
        let resp = self.send(builder, auth).await?;
        self.handle_empty(resp).await
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PATCH {url}");

        let builder = self.http.patch(url).json(body);
        let resp = self.send(builder, Auth::Bearer).await?;
        self.handle_response(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let builder = self.http.delete(url);
        let resp = self.send(builder, Auth::Bearer).await?;
        self.handle_empty(resp).await
    }

    /// Attach authorization and send, folding reqwest timeouts into
    /// [`Error::Timeout`].
    async fn send(&self, builder: RequestBuilder, auth: Auth) -> Result<Response, Error> {
        let builder = match (auth, self.tokens.get(TokenKey::AccessToken)) {
            (Auth::Bearer, Some(token)) => builder.bearer_auth(token.expose_secret()),
            _ => builder,
        };

        builder.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_secs: self.timeout.as_secs(),
                }
            } else {
                Error::Transport(e)
            }
        })
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(&self, resp: Response) -> Result<T, Error> {
        let status = resp.status();
        if !status.is_success() {
            return Err(self.parse_error(status, resp).await);
        }

        let body = resp.text().await?;
        serde_json::from_str::<Envelope<T>>(&body)
            .map(|envelope| envelope.data)
            .map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
    }

    async fn handle_empty(&self, resp: Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: StatusCode, resp: Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        let first = serde_json::from_str::<ErrorEnvelope>(&raw)
            .ok()
            .and_then(|envelope| envelope.errors.into_iter().next());

        match first {
            Some(item) => Error::Api {
                status: status.as_u16(),
                message: item.message.unwrap_or_else(|| status.to_string()),
                code: item.extensions.and_then(|ext| ext.code),
            },
            None => Error::Api {
                status: status.as_u16(),
                message: if raw.is_empty() {
                    status.to_string()
                } else {
                    raw.chars().take(200).collect()
                },
                code: None,
            },
        }
    }
}

/// Ensure the base path ends with `/` so relative joins append rather
/// than replace the last segment.
fn normalize_base_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::auth::MemoryTokenStore;

    fn client(base: &str) -> DirectusClient {
        DirectusClient::with_client(
            reqwest::Client::new(),
            Url::parse(base).unwrap(),
            Arc::new(MemoryTokenStore::new()),
            crate::transport::DEFAULT_TIMEOUT,
        )
    }

    #[test]
    fn url_joins_below_root() {
        let c = client("https://cmms.example.com");
        assert_eq!(
            c.url("items/machine").unwrap().as_str(),
            "https://cmms.example.com/items/machine"
        );
    }

    #[test]
    fn url_keeps_base_path_prefix() {
        let c = client("https://example.com/directus");
        assert_eq!(
            c.url("/items/machine").unwrap().as_str(),
            "https://example.com/directus/items/machine"
        );
    }

    #[test]
    fn item_path_encodes_id_as_one_segment() {
        let c = client("https://example.com/directus");
        assert_eq!(c.item_path("machine", "42").unwrap(), "items/machine/42");
        assert_eq!(
            c.item_path("purchase_request", "9/../../intervention/3").unwrap(),
            "items/purchase_request/9%2F..%2F..%2Fintervention%2F3"
        );
        assert_eq!(
            c.item_path("stock_item", "a?b#c%2e").unwrap(),
            "items/stock_item/a%3Fb%23c%252e"
        );

        let joined = c.url(&c.item_path("machine", "x/../../stock_item/5").unwrap()).unwrap();
        assert_eq!(
            joined.as_str(),
            "https://example.com/directus/items/machine/x%2F..%2F..%2Fstock_item%2F5"
        );
    }

    #[test]
    fn item_path_rejects_dot_segments() {
        let c = client("https://cmms.example.com");
        for id in ["", ".", ".."] {
            assert!(matches!(
                c.item_path("machine", id),
                Err(Error::InvalidId { .. })
            ));
        }
    }
}
