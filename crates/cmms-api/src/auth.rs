// Persisted authentication state.
//
// Tokens live behind the `TokenStore` trait so the storage medium (OS
// keychain, browser storage, memory) is swappable. The client reads the
// access token on every request; only the auth adapter writes.

use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};

use secrecy::SecretString;

use crate::error::Error;

/// Well-known keys of the persisted auth state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKey {
    AccessToken,
    RefreshToken,
    /// RFC 3339 timestamp of the last successful login.
    LoginTimestamp,
}

impl TokenKey {
    pub const ALL: [Self; 3] = [Self::AccessToken, Self::RefreshToken, Self::LoginTimestamp];

    /// Storage key string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AccessToken => "cmms.access_token",
            Self::RefreshToken => "cmms.refresh_token",
            Self::LoginTimestamp => "cmms.login_at",
        }
    }

    /// Human-readable name, used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::AccessToken => "access token",
            Self::RefreshToken => "refresh token",
            Self::LoginTimestamp => "login timestamp",
        }
    }
}

impl fmt::Display for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persistent key-value store for authentication tokens.
///
/// `get` is infallible by contract: a backend that cannot read reports the
/// key as absent, which callers treat as "not authenticated".
pub trait TokenStore: Send + Sync {
    fn get(&self, key: TokenKey) -> Option<SecretString>;

    fn set(&self, key: TokenKey, value: SecretString) -> Result<(), Error>;

    fn remove(&self, key: TokenKey) -> Result<(), Error>;

    /// Remove every auth key. Attempts all keys even if one fails and
    /// reports the first failure.
    fn clear(&self) -> Result<(), Error> {
        let mut first_err = None;
        for key in TokenKey::ALL {
            if let Err(e) = self.remove(key) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

/// In-process token store. Used by tests and short-lived tools.
#[derive(Default)]
pub struct MemoryTokenStore {
    entries: RwLock<HashMap<TokenKey, SecretString>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Debug for MemoryTokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<TokenKey> = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect();
        f.debug_struct("MemoryTokenStore").field("keys", &keys).finish()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: TokenKey) -> Option<SecretString> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned()
    }

    fn set(&self, key: TokenKey, value: SecretString) -> Result<(), Error> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, value);
        Ok(())
    }

    fn remove(&self, key: TokenKey) -> Result<(), Error> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&key);
        Ok(())
    }
}
