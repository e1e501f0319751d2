// ── Core error types ──
//
// User-facing errors from cmms-core. Consumers never match on HTTP codes
// or decode failures directly: every backend failure is classified into an
// `ErrorKind` by `crate::api_call`, tagged with the operation that failed,
// and keeps the transport error as its `source()`.

use std::fmt;

use thiserror::Error;

/// Failure classes of a backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The backend could not be reached (DNS, refused connection, reset).
    Network,
    /// No answer within the configured request ceiling.
    Timeout,
    /// The backend rejected the request (4xx).
    Client { status: u16 },
    /// The backend failed to handle the request (5xx).
    Server { status: u16 },
    /// A 2xx answer whose body could not be decoded.
    MalformedResponse,
    Unknown,
}

impl ErrorKind {
    /// Classify a transport-layer error.
    pub fn classify(err: &cmms_api::Error) -> Self {
        use cmms_api::Error as ApiError;

        match err {
            ApiError::MissingToken { .. } => Self::Client { status: 401 },
            ApiError::InvalidId { .. } => Self::Client { status: 400 },
            ApiError::Timeout { .. } => Self::Timeout,
            ApiError::Api { status, .. } => Self::from_status(*status),
            ApiError::Deserialization { .. } => Self::MalformedResponse,
            ApiError::Transport(e) => {
                if e.is_timeout() {
                    Self::Timeout
                } else if e.is_connect() || e.is_request() {
                    Self::Network
                } else if e.is_decode() || e.is_body() {
                    Self::MalformedResponse
                } else if let Some(status) = e.status() {
                    Self::from_status(status.as_u16())
                } else {
                    Self::Unknown
                }
            }
            ApiError::TokenStore(_) | ApiError::InvalidUrl(_) | ApiError::Tls(_) => Self::Unknown,
        }
    }

    fn from_status(status: u16) -> Self {
        match status {
            400..=499 => Self::Client { status },
            500..=599 => Self::Server { status },
            _ => Self::Unknown,
        }
    }

    /// HTTP status carried by the kind, if any.
    pub fn status(self) -> Option<u16> {
        match self {
            Self::Client { status } | Self::Server { status } => Some(status),
            _ => None,
        }
    }

    /// Message suitable for showing to an end user.
    pub fn user_message(self) -> &'static str {
        match self {
            Self::Network => "Unable to reach the server. Check your network connection.",
            Self::Timeout => "The server took too long to respond. Please try again.",
            Self::Client { status: 401 } => "Your session has expired. Please sign in again.",
            Self::Client { status: 403 } => "You are not allowed to perform this action.",
            Self::Client { status: 404 } => "The requested item could not be found.",
            Self::Client { status: 409 } => "The item was changed by someone else.",
            Self::Client {
                status: 400 | 422,
            } => "Some of the submitted data is invalid.",
            Self::Client { .. } => "The server refused the request.",
            Self::Server { .. } => "The server encountered an error. Please try again later.",
            Self::MalformedResponse => "The server returned an unexpected response.",
            Self::Unknown => "An unexpected error occurred.",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => f.write_str("network"),
            Self::Timeout => f.write_str("timeout"),
            Self::Client { status } => write!(f, "client error ({status})"),
            Self::Server { status } => write!(f, "server error ({status})"),
            Self::MalformedResponse => f.write_str("malformed response"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

/// A classified backend failure.
#[derive(Debug, Error)]
#[error("{operation} failed ({kind}): {message}")]
pub struct CoreError {
    kind: ErrorKind,
    operation: &'static str,
    message: String,
    #[source]
    source: cmms_api::Error,
}

impl CoreError {
    /// Classify `source` as a failure of `operation`.
    pub fn new(operation: &'static str, source: cmms_api::Error) -> Self {
        let kind = ErrorKind::classify(&source);
        Self {
            kind,
            operation,
            message: kind.user_message().to_owned(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Name of the adapter operation that failed (e.g. `"fetch_interventions"`).
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Human-presentable description.
    pub fn user_message(&self) -> &str {
        &self.message
    }

    /// The underlying transport error.
    pub fn api_error(&self) -> &cmms_api::Error {
        &self.source
    }

    pub fn status(&self) -> Option<u16> {
        self.kind.status()
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    fn api(status: u16) -> cmms_api::Error {
        cmms_api::Error::Api {
            status,
            message: "backend says no".into(),
            code: None,
        }
    }

    #[test]
    fn status_ranges_split_client_and_server() {
        assert_eq!(ErrorKind::classify(&api(404)), ErrorKind::Client { status: 404 });
        assert_eq!(ErrorKind::classify(&api(503)), ErrorKind::Server { status: 503 });
        assert_eq!(ErrorKind::classify(&api(302)), ErrorKind::Unknown);
    }

    #[test]
    fn non_http_failures_classify() {
        assert_eq!(
            ErrorKind::classify(&cmms_api::Error::Timeout { timeout_secs: 15 }),
            ErrorKind::Timeout
        );
        assert_eq!(
            ErrorKind::classify(&cmms_api::Error::Deserialization {
                message: "expected value".into(),
                body: "<html>".into(),
            }),
            ErrorKind::MalformedResponse
        );
        assert_eq!(
            ErrorKind::classify(&cmms_api::Error::MissingToken {
                key: "access token"
            }),
            ErrorKind::Client { status: 401 }
        );
        assert_eq!(
            ErrorKind::classify(&cmms_api::Error::InvalidId { id: "..".into() }),
            ErrorKind::Client { status: 400 }
        );
        assert_eq!(
            ErrorKind::classify(&cmms_api::Error::TokenStore("locked".into())),
            ErrorKind::Unknown
        );
    }

    #[test]
    fn core_error_keeps_operation_and_source() {
        let err = CoreError::new("fetch_machine", api(404));

        assert_eq!(err.operation(), "fetch_machine");
        assert!(err.is_not_found());
        assert!(!err.is_unauthorized());
        assert_eq!(err.user_message(), "The requested item could not be found.");
        assert!(err.to_string().starts_with("fetch_machine failed"));

        let source = err.source().map(ToString::to_string);
        assert_eq!(
            source.as_deref(),
            Some("API error (HTTP 404): backend says no")
        );
        assert!(matches!(
            err.api_error(),
            cmms_api::Error::Api { status: 404, .. }
        ));
    }

    #[test]
    fn every_kind_has_a_message() {
        let kinds = [
            ErrorKind::Network,
            ErrorKind::Timeout,
            ErrorKind::Client { status: 401 },
            ErrorKind::Client { status: 418 },
            ErrorKind::Server { status: 500 },
            ErrorKind::MalformedResponse,
            ErrorKind::Unknown,
        ];
        for kind in kinds {
            assert!(!kind.user_message().is_empty(), "{kind}");
        }
        assert_eq!(
            CoreError::new("login", api(401)).user_message(),
            ErrorKind::Client { status: 401 }.user_message()
        );
    }
}
