use thiserror::Error;

/// Top-level error type for the `cmms-api` crate.
///
/// Covers every transport-level failure mode: connection, timeout, HTTP
/// status, response decoding, and token storage. `cmms-core` classifies
/// these into its typed domain error; application code never sees them raw.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// No token of the required kind is available in the token store.
    #[error("Not authenticated: no {key} in the token store")]
    MissingToken { key: &'static str },

    /// The token store backend refused a read or write.
    #[error("Token store error: {0}")]
    TokenStore(String),

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// An item id that cannot name a single path segment (empty, `.`, `..`).
    #[error("Invalid item id: {id:?}")]
    InvalidId { id: String },

    /// Request exceeded the configured time budget.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// HTTP client build failure or invalid TLS material.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Backend ─────────────────────────────────────────────────────
    /// Non-2xx response, parsed from the `{ errors: [...] }` envelope when present.
    #[error("API error (HTTP {status}): {message}")]
    Api {
        status: u16,
        message: String,
        code: Option<String>,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// The HTTP status the backend answered with, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if the backend rejected the credentials or token.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::MissingToken { .. }) || self.status() == Some(401)
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Extract the backend error code (e.g. `"INVALID_CREDENTIALS"`), if available.
    pub fn api_error_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_status_drives_predicates() {
        let not_found = Error::Api {
            status: 404,
            message: "Route doesn't exist".into(),
            code: Some("ROUTE_NOT_FOUND".into()),
        };
        assert!(not_found.is_not_found());
        assert_eq!(not_found.api_error_code(), Some("ROUTE_NOT_FOUND"));

        let unavailable = Error::Api {
            status: 503,
            message: "Service Unavailable".into(),
            code: None,
        };
        assert_eq!(unavailable.status(), Some(503));
        assert!(!unavailable.is_unauthorized());
        assert!(!unavailable.is_not_found());
    }

    #[test]
    fn missing_token_counts_as_unauthorized() {
        let err = Error::MissingToken {
            key: "refresh token",
        };
        assert!(err.is_unauthorized());
        assert_eq!(err.status(), None);
    }
}
