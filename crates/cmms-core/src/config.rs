// ── Runtime backend configuration ──
//
// Describes *where* the backend lives and how patient to be with it.
// Never touches disk: `cmms-config` (or any other caller) builds a
// `CmmsConfig` and hands it to `Cmms::new`.

use std::path::PathBuf;
use std::time::Duration;

use cmms_api::{TlsMode, TransportConfig};
use url::Url;

use crate::cache::DEFAULT_TTL;

/// Connection settings for one backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmmsConfig {
    /// Backend root, e.g. `https://cmms.example.com`.
    pub base_url: Url,
    /// Ceiling for every backend call.
    pub timeout: Duration,
    /// Lifetime of cached responses.
    pub cache_ttl: Duration,
    /// Overrides the default `User-Agent` header.
    pub user_agent: Option<String>,
    /// Extra CA certificate (PEM) to trust.
    pub ca_cert: Option<PathBuf>,
}

impl CmmsConfig {
    /// Defaults for everything but the URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: cmms_api::transport::DEFAULT_TIMEOUT,
            cache_ttl: DEFAULT_TTL,
            user_agent: None,
            ca_cert: None,
        }
    }

    pub fn transport(&self) -> TransportConfig {
        let mut transport = TransportConfig::default().with_timeout(self.timeout);
        if let Some(agent) = &self.user_agent {
            transport.user_agent.clone_from(agent);
        }
        if let Some(path) = &self.ca_cert {
            transport.tls = TlsMode::CustomCa(path.clone());
        }
        transport
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn transport_follows_config() {
        let mut config = CmmsConfig::new(Url::parse("https://cmms.example.com").unwrap());
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert_eq!(config.cache_ttl, Duration::from_secs(30));

        config.timeout = Duration::from_secs(5);
        config.user_agent = Some("atelier/1.0".into());
        config.ca_cert = Some(PathBuf::from("/etc/cmms/ca.pem"));
        let transport = config.transport();

        assert_eq!(transport.timeout, Duration::from_secs(5));
        assert_eq!(transport.user_agent, "atelier/1.0");
        assert!(matches!(transport.tls, TlsMode::CustomCa(ref p) if p.ends_with("ca.pem")));
    }
}
