//! Shared configuration for CMMS applications.
//!
//! TOML config file, `CMMS_*` environment overrides, translation to
//! `cmms_core::CmmsConfig`, and a `TokenStore` backed by the OS keychain.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use cmms_api::{TokenKey, TokenStore};
use cmms_core::{Cmms, CmmsConfig, CoreError};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config ─────────────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Backend base URL (e.g., "https://cmms.example.com").
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Cached response lifetime in seconds. `0` disables reuse.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,

    pub user_agent: Option<String>,

    /// Path to a custom CA certificate (PEM).
    pub ca_cert: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_secs: default_timeout(),
            cache_ttl_secs: default_cache_ttl(),
            user_agent: None,
            ca_cert: None,
        }
    }
}

fn default_api_url() -> String {
    "http://localhost:8055".into()
}
fn default_timeout() -> u64 {
    15
}
fn default_cache_ttl() -> u64 {
    30
}

impl Config {
    /// Validate and convert into the runtime configuration.
    pub fn to_core(&self) -> Result<CmmsConfig, ConfigError> {
        let base_url = Url::parse(self.api_url.trim()).map_err(|e| ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("{e}: {}", self.api_url),
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation {
                field: "api_url".into(),
                reason: format!("expected an http(s) URL, got '{}'", self.api_url),
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation {
                field: "timeout_secs".into(),
                reason: "must be at least 1".into(),
            });
        }

        Ok(CmmsConfig {
            base_url,
            timeout: Duration::from_secs(self.timeout_secs),
            cache_ttl: Duration::from_secs(self.cache_ttl_secs),
            user_agent: self.user_agent.clone(),
            ca_cert: self.ca_cert.clone(),
        })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "cmms", "cmms").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("cmms");
    p
}

// ── Loading and saving ──────────────────────────────────────────────

/// Load from the canonical config path plus environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Defaults, then the TOML file at `path` (if present), then `CMMS_*`
/// environment variables (`CMMS_API_URL`, `CMMS_TIMEOUT_SECS`, ...).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("CMMS_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(path: &Path, cfg: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(&config_path(), cfg)
}

// ── Keychain token store ────────────────────────────────────────────

/// Keychain service name tokens are stored under.
pub const KEYRING_SERVICE: &str = "cmms";

/// [`TokenStore`] persisting tokens in the OS keychain, one entry per key.
#[derive(Debug, Clone)]
pub struct KeyringTokenStore {
    service: String,
}

impl KeyringTokenStore {
    pub fn new() -> Self {
        Self::with_service(KEYRING_SERVICE)
    }

    /// Store under another service name, e.g. one per backend.
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    fn entry(&self, key: TokenKey) -> keyring::Result<keyring::Entry> {
        keyring::Entry::new(&self.service, key.as_str())
    }
}

impl Default for KeyringTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStore for KeyringTokenStore {
    fn get(&self, key: TokenKey) -> Option<SecretString> {
        match self.entry(key).and_then(|entry| entry.get_password()) {
            Ok(secret) => Some(SecretString::from(secret)),
            Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                warn!(%key, error = %e, "keychain read failed");
                None
            }
        }
    }

    fn set(&self, key: TokenKey, value: SecretString) -> Result<(), cmms_api::Error> {
        self.entry(key)
            .and_then(|entry| entry.set_password(value.expose_secret()))
            .map_err(|e| cmms_api::Error::TokenStore(format!("{key}: {e}")))
    }

    fn remove(&self, key: TokenKey) -> Result<(), cmms_api::Error> {
        match self.entry(key).and_then(|entry| entry.delete_credential()) {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(cmms_api::Error::TokenStore(format!("{key}: {e}"))),
        }
    }
}

// ── Wiring ──────────────────────────────────────────────────────────

/// Build a [`Cmms`] from `cfg`, persisting tokens in the keychain.
pub fn connect(cfg: &Config) -> Result<Cmms, ConfigError> {
    let core = cfg.to_core()?;
    let store: Arc<dyn TokenStore> = Arc::new(KeyringTokenStore::new());
    Ok(Cmms::new(&core, store)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.timeout_secs, 15);
        assert_eq!(cfg.cache_ttl_secs, 30);
        assert_eq!(cfg.ca_cert, None);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            concat!(
                "api_url = \"https://cmms.plant.example\"\n",
                "timeout_secs = 5\n",
                "user_agent = \"atelier/2\"\n",
            ),
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.timeout_secs, 5);
        assert_eq!(cfg.cache_ttl_secs, 30);
        assert_eq!(cfg.user_agent.as_deref(), Some("atelier/2"));
        if std::env::var_os("CMMS_API_URL").is_none() {
            assert_eq!(cfg.api_url, "https://cmms.plant.example");
        }
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timeout_secs = \"soon\"\n").unwrap();

        assert!(matches!(
            load_config_from(&path),
            Err(ConfigError::Figment(_))
        ));
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config {
            cache_ttl_secs: 0,
            ca_cert: Some(PathBuf::from("/etc/cmms/ca.pem")),
            ..Config::default()
        };

        save_config_to(&path, &cfg).unwrap();
        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.cache_ttl_secs, 0);
        assert_eq!(loaded.ca_cert, cfg.ca_cert);
    }

    #[test]
    fn to_core_converts_units() {
        let cfg = Config {
            api_url: " https://cmms.plant.example ".into(),
            timeout_secs: 8,
            cache_ttl_secs: 60,
            user_agent: Some("atelier/2".into()),
            ca_cert: None,
        };
        let core = cfg.to_core().unwrap();
        assert_eq!(core.base_url.as_str(), "https://cmms.plant.example/");
        assert_eq!(core.timeout, Duration::from_secs(8));
        assert_eq!(core.cache_ttl, Duration::from_secs(60));
        assert_eq!(core.user_agent.as_deref(), Some("atelier/2"));
    }

    #[test]
    fn to_core_rejects_bad_values() {
        let bad_url = Config {
            api_url: "not a url".into(),
            ..Config::default()
        };
        assert!(matches!(
            bad_url.to_core(),
            Err(ConfigError::Validation { ref field, .. }) if field == "api_url"
        ));

        let ftp = Config {
            api_url: "ftp://cmms.plant.example".into(),
            ..Config::default()
        };
        assert!(ftp.to_core().is_err());

        let zero_timeout = Config {
            timeout_secs: 0,
            ..Config::default()
        };
        assert!(matches!(
            zero_timeout.to_core(),
            Err(ConfigError::Validation { ref field, .. }) if field == "timeout_secs"
        ));
    }

    #[test]
    fn keyring_store_service_name() {
        assert_eq!(KeyringTokenStore::new().service(), "cmms");
        assert_eq!(KeyringTokenStore::with_service("cmms-staging").service(), "cmms-staging");
    }
}
