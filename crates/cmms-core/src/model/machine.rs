// ── Machine domain types ──

use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

/// A piece of equipment under maintenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    pub id: EntityId,
    pub code: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub parent_id: Option<EntityId>,
    /// `false` once the machine is archived.
    pub is_active: bool,
}

/// Denormalized machine snapshot embedded in other entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineRef {
    pub id: EntityId,
    pub code: Option<String>,
    pub name: Option<String>,
}

impl MachineRef {
    /// Code, then name, then id -- whichever is known first.
    pub fn label(&self) -> String {
        self.code
            .clone()
            .or_else(|| self.name.clone())
            .unwrap_or_else(|| self.id.to_string())
    }
}
