// ── Core identity type ──
//
// Backend primary keys are integers for most collections and strings
// (uuid, slug) for a few. EntityId hides the difference from callers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use cmms_api::models::RawId;

/// Canonical identifier for any CMMS entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Int(i64),
    Text(String),
}

impl EntityId {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Int(_) => None,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for EntityId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        match s.parse::<i64>() {
            Ok(n) => Self::Int(n),
            Err(_) => Self::Text(s),
        }
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

impl From<RawId> for EntityId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Int(n) => Self::Int(n),
            RawId::Text(s) => Self::Text(s),
        }
    }
}

impl From<&EntityId> for RawId {
    fn from(id: &EntityId) -> Self {
        match id {
            EntityId::Int(n) => Self::Int(*n),
            EntityId::Text(s) => Self::Text(s.clone()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn entity_id_from_numeric_string() {
        let id = EntityId::from("42");
        assert_eq!(id.as_int(), Some(42));
    }

    #[test]
    fn entity_id_from_uuid_string() {
        let id = EntityId::from("550e8400-e29b-41d4-a716-446655440000".to_owned());
        assert_eq!(id.as_text(), Some("550e8400-e29b-41d4-a716-446655440000"));
    }

    #[test]
    fn entity_id_display_round_trips_path_segment() {
        let id: EntityId = "PRS-01".parse().unwrap();
        assert_eq!(id.to_string(), "PRS-01");
        assert_eq!(EntityId::Int(7).to_string(), "7");
    }

    #[test]
    fn entity_id_to_raw_keeps_variant() {
        assert_eq!(RawId::from(&EntityId::Int(3)), RawId::Int(3));
        assert_eq!(
            RawId::from(&EntityId::Text("a".into())),
            RawId::Text("a".into())
        );
    }
}
