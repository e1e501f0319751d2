// ── Intervention action domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

/// Time-tracked work logged against an intervention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionAction {
    pub id: EntityId,
    pub intervention_id: Option<EntityId>,
    pub description: Option<String>,
    /// Hours spent; `0.0` when not recorded.
    pub time_spent_hours: f64,
    pub subcategory: Option<ActionSubcategory>,
    pub technician: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSubcategory {
    pub id: EntityId,
    pub code: Option<String>,
    pub name: Option<String>,
}

/// Partial action write. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionUpdate {
    pub intervention_id: Option<EntityId>,
    pub description: Option<String>,
    pub time_spent_hours: Option<f64>,
    pub subcategory_id: Option<EntityId>,
    pub technician: Option<String>,
}
