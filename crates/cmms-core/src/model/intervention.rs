// ── Intervention domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;
use super::machine::MachineRef;
use super::status::InterventionStatus;

/// A corrective or planned maintenance job on a machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intervention {
    pub id: EntityId,
    pub code: Option<String>,
    pub title: Option<String>,
    pub status: InterventionStatus,
    /// Display label of the status reference row, when expanded.
    pub status_label: Option<String>,
    pub machine: Option<MachineRef>,
    pub priority: Option<String>,
    pub reported_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    /// Initials of the assigned technician.
    pub assigned_to: Option<String>,
}

/// Row of the status reference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionStatusRef {
    pub id: Option<EntityId>,
    pub value: InterventionStatus,
    pub label: String,
    pub color: Option<String>,
}

/// Partial intervention write. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterventionUpdate {
    pub code: Option<String>,
    pub title: Option<String>,
    pub status: Option<InterventionStatus>,
    pub machine_id: Option<EntityId>,
    pub priority: Option<String>,
    pub reported_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub assigned_to: Option<String>,
}

/// Selection criteria for intervention lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct InterventionFilter {
    pub status: Option<InterventionStatus>,
    pub machine_id: Option<EntityId>,
    pub limit: Option<u32>,
}
