// ── Purchasing domain types ──
//
// Purchase requests raised by technicians and the supplier orders that
// fulfil them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;
use super::status::{PurchaseRequestStatus, SupplierOrderStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRequest {
    pub id: EntityId,
    pub item_label: Option<String>,
    /// Requested quantity; `0.0` when not recorded.
    pub quantity: f64,
    pub unit: Option<String>,
    pub urgency: Option<String>,
    pub status: PurchaseRequestStatus,
    pub requested_by: Option<String>,
    pub intervention_id: Option<EntityId>,
    pub stock_item_id: Option<EntityId>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Partial purchase request write. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRequestUpdate {
    pub item_label: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub urgency: Option<String>,
    pub status: Option<PurchaseRequestStatus>,
    pub requested_by: Option<String>,
    pub intervention_id: Option<EntityId>,
    pub stock_item_id: Option<EntityId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierOrder {
    pub id: EntityId,
    pub order_number: Option<String>,
    pub supplier: Option<SupplierRef>,
    pub status: SupplierOrderStatus,
    pub total_amount: Option<f64>,
    pub ordered_at: Option<DateTime<Utc>>,
    pub received_at: Option<DateTime<Utc>>,
    pub line_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierRef {
    pub id: EntityId,
    pub name: Option<String>,
}

/// Partial supplier order write. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplierOrderUpdate {
    pub status: Option<SupplierOrderStatus>,
    pub total_amount: Option<f64>,
    pub ordered_at: Option<DateTime<Utc>>,
    pub received_at: Option<DateTime<Utc>>,
}
