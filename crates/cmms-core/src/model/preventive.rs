// ── Preventive maintenance suggestion ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;
use super::machine::MachineRef;
use super::status::SuggestionStatus;

/// A preventive task proposed from recurring corrective work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreventiveSuggestion {
    pub id: EntityId,
    pub machine_id: Option<EntityId>,
    pub preventive_code: Option<String>,
    pub preventive_label: Option<String>,
    /// Relevance score; `0.0` when the backend omits it.
    pub score: f64,
    pub status: SuggestionStatus,
    pub detected_at: Option<DateTime<Utc>>,
    pub handled_at: Option<DateTime<Utc>>,
    pub handled_by: Option<EntityId>,
    pub intervention_action_id: Option<EntityId>,
    pub machine: Option<MachineRef>,
}

/// How a suggestion was handled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionDecision {
    pub status: SuggestionStatus,
    pub handled_at: Option<DateTime<Utc>>,
    pub handled_by: Option<EntityId>,
}
