// ── Stock domain types ──

use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

/// A spare part or consumable kept in stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    pub id: EntityId,
    pub reference: Option<String>,
    pub name: Option<String>,
    /// On-hand quantity; `0.0` when not recorded.
    pub quantity: f64,
    pub min_quantity: Option<f64>,
    pub unit: Option<String>,
    pub location: Option<String>,
}

impl StockItem {
    /// `true` when a threshold is set and the on-hand quantity is under it.
    pub fn is_below_minimum(&self) -> bool {
        self.min_quantity.is_some_and(|min| self.quantity < min)
    }
}

/// Partial stock write. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockUpdate {
    pub quantity: Option<f64>,
    pub min_quantity: Option<f64>,
    pub location: Option<String>,
}
