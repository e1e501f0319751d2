// Directus wire types
//
// Raw request/response shapes exactly as the backend speaks them: snake_case
// field names, relations that are either a bare key or an expanded object,
// statuses that are either a string or a status-reference row. Fields use
// `#[serde(default)]` liberally because the field selection decides which
// attributes come back. Nothing here is meant to reach application code;
// `cmms-core` maps these into domain types.

use serde::{Deserialize, Serialize};

// ── Response Envelope ────────────────────────────────────────────────

/// Standard Directus response envelope.
///
/// Every item endpoint wraps its payload:
/// ```json
/// { "data": ... }
/// ```
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Directus error body: `{ "errors": [{ "message": ..., "extensions": { "code": ... } }] }`.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub errors: Vec<ErrorItem>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorItem {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub extensions: Option<ErrorExtensions>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorExtensions {
    #[serde(default)]
    pub code: Option<String>,
}

// ── Shared shapes ────────────────────────────────────────────────────

/// Primary key as stored by the backend: integer or string (uuid, slug).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Int(i64),
    Text(String),
}

impl RawId {
    /// Path-segment form of the key.
    pub fn to_key(&self) -> String {
        match self {
            Self::Int(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

/// A many-to-one field: a bare foreign key, or the related row when the
/// field selection expanded it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Relation<T> {
    Expanded(Box<T>),
    Key(RawId),
}

impl<T> Relation<T> {
    pub fn expanded(&self) -> Option<&T> {
        match self {
            Self::Expanded(row) => Some(row),
            Self::Key(_) => None,
        }
    }
}

/// Loosely-typed status field: `"open"`, `{ "value": "open", ... }`, `null`,
/// or whatever else an older schema produced.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawStatus {
    Text(String),
    Ref(RawStatusRef),
    Other(serde_json::Value),
}

impl RawStatus {
    /// The string candidate: the text itself, or the row's `value`.
    pub fn candidate(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Ref(row) => row.value.as_deref(),
            Self::Other(_) => None,
        }
    }

    pub fn as_ref_row(&self) -> Option<&RawStatusRef> {
        match self {
            Self::Ref(row) => Some(row),
            _ => None,
        }
    }
}

/// Row of the `intervention_status_ref` collection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawStatusRef {
    #[serde(default)]
    pub id: Option<RawId>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

// ── Auth ─────────────────────────────────────────────────────────────

/// `POST /auth/login` and `POST /auth/refresh` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAuthTokens {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Access-token lifetime in milliseconds.
    #[serde(default)]
    pub expires: Option<u64>,
}

/// `GET /users/me`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub role: Option<Relation<RawRole>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRole {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

// ── Machine ──────────────────────────────────────────────────────────

/// Row of the `machine` collection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawMachine {
    pub id: RawId,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub parent_id: Option<RawId>,
    /// `"active"`, `"archived"`, ...
    #[serde(default)]
    pub status: Option<String>,
}

// ── Intervention ─────────────────────────────────────────────────────

/// Row of the `intervention` collection.
#[derive(Debug, Clone, Deserialize)]
pub struct RawIntervention {
    pub id: RawId,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status_actual: Option<RawStatus>,
    #[serde(default)]
    pub machine_id: Option<Relation<RawMachine>>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub reported_date: Option<String>,
    #[serde(default)]
    pub closed_date: Option<String>,
    #[serde(default)]
    pub tech_initials: Option<String>,
}

/// Partial `intervention` write. `None` fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawInterventionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_actual: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machine_id: Option<RawId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reported_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech_initials: Option<String>,
}

// ── Intervention action ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawSubcategory {
    pub id: RawId,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Row of the `intervention_action` collection.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAction {
    pub id: RawId,
    #[serde(default)]
    pub intervention_id: Option<RawId>,
    #[serde(default)]
    pub description: Option<String>,
    /// Hours, possibly fractional.
    #[serde(default)]
    pub time_spent: Option<f64>,
    #[serde(default)]
    pub action_subcategory: Option<Relation<RawSubcategory>>,
    #[serde(default)]
    pub tech: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawActionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intervention_id: Option<RawId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_spent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_subcategory: Option<RawId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tech: Option<String>,
}

// ── Preventive suggestion ────────────────────────────────────────────

/// Row of the `preventive_suggestion` collection.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPreventiveSuggestion {
    pub id: RawId,
    #[serde(default)]
    pub machine_id: Option<Relation<RawMachine>>,
    #[serde(default)]
    pub preventive_code: Option<String>,
    #[serde(default)]
    pub preventive_label: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    /// `"NEW"`, `"REVIEWED"`, `"ACCEPTED"`, `"REJECTED"`.
    #[serde(default)]
    pub status: Option<RawStatus>,
    #[serde(default)]
    pub detected_at: Option<String>,
    #[serde(default)]
    pub handled_at: Option<String>,
    #[serde(default)]
    pub handled_by: Option<RawId>,
    #[serde(default)]
    pub intervention_action_id: Option<RawId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawSuggestionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handled_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handled_by: Option<RawId>,
}

// ── Service statistics ───────────────────────────────────────────────

/// `GET /stats/service-status`. Every derived figure is optional; the
/// mapper computes what the backend leaves out.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawServiceStatus {
    #[serde(default)]
    pub time_breakdown: Option<RawTimeBreakdown>,
    #[serde(default)]
    pub total_hours: Option<f64>,
    #[serde(default)]
    pub charge_percent: Option<f64>,
    #[serde(default)]
    pub frag_percent: Option<f64>,
    #[serde(default)]
    pub pilot_percent: Option<f64>,
    #[serde(default)]
    pub short_actions_percent: Option<f64>,
    /// Number of actions logged in the window.
    #[serde(default)]
    pub action_count: Option<u32>,
    #[serde(default)]
    pub fragmentation: Option<RawFragmentation>,
    #[serde(default)]
    pub site_consumption: Option<RawSiteConsumption>,
}

/// Hours per activity family.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTimeBreakdown {
    #[serde(default, rename = "PROD")]
    pub prod: Option<f64>,
    #[serde(default, rename = "DEP")]
    pub dep: Option<f64>,
    #[serde(default, rename = "PILOT")]
    pub pilot: Option<f64>,
    #[serde(default, rename = "FRAG")]
    pub frag: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFragmentation {
    /// Number of short actions in the window.
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub items: Vec<RawFragmentationItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawFragmentationItem {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub count: Option<u32>,
    #[serde(default)]
    pub hours: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSiteConsumption {
    #[serde(default)]
    pub total_service_hours: Option<f64>,
    #[serde(default)]
    pub total_frag_hours: Option<f64>,
    #[serde(default)]
    pub items: Vec<RawSiteConsumptionItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSiteConsumptionItem {
    #[serde(default)]
    pub site_id: Option<RawId>,
    #[serde(default)]
    pub site_name: Option<String>,
    #[serde(default)]
    pub service_hours: Option<f64>,
    #[serde(default)]
    pub frag_hours: Option<f64>,
}

// ── Stock ────────────────────────────────────────────────────────────

/// Row of the `stock_item` collection.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStockItem {
    pub id: RawId,
    #[serde(default, rename = "ref")]
    pub reference: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub min_quantity: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawStockPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

// ── Purchase request ─────────────────────────────────────────────────

/// Row of the `purchase_request` collection.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPurchaseRequest {
    pub id: RawId,
    #[serde(default)]
    pub item_label: Option<String>,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub urgency: Option<String>,
    #[serde(default)]
    pub status: Option<RawStatus>,
    #[serde(default)]
    pub requested_by: Option<String>,
    #[serde(default)]
    pub intervention_id: Option<RawId>,
    #[serde(default)]
    pub stock_item_id: Option<RawId>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawPurchaseRequestPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intervention_id: Option<RawId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_item_id: Option<RawId>,
}

// ── Supplier order ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawSupplier {
    pub id: RawId,
    #[serde(default)]
    pub name: Option<String>,
}

/// Row of the `supplier_order` collection.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSupplierOrder {
    pub id: RawId,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub supplier_id: Option<Relation<RawSupplier>>,
    #[serde(default)]
    pub status: Option<RawStatus>,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub ordered_at: Option<String>,
    #[serde(default)]
    pub received_at: Option<String>,
    /// O2M line ids.
    #[serde(default)]
    pub lines: Option<Vec<RawId>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawSupplierOrderPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordered_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_at: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn relation_decodes_key_or_row() {
        let key: Relation<RawMachine> = serde_json::from_value(json!(12)).unwrap();
        assert_eq!(key, Relation::Key(RawId::Int(12)));

        let row: Relation<RawMachine> =
            serde_json::from_value(json!({ "id": "m-1", "code": "PRS-01" })).unwrap();
        let machine = row.expanded().unwrap();
        assert_eq!(machine.id, RawId::Text("m-1".into()));
        assert_eq!(machine.code.as_deref(), Some("PRS-01"));
    }

    #[test]
    fn status_decodes_every_backend_shape() {
        let text: RawStatus = serde_json::from_value(json!("CLOSED")).unwrap();
        assert_eq!(text.candidate(), Some("CLOSED"));

        let row: RawStatus =
            serde_json::from_value(json!({ "id": "ouvert", "value": "open", "label": "Ouvert" }))
                .unwrap();
        assert_eq!(row.candidate(), Some("open"));
        assert_eq!(
            row.as_ref_row().and_then(|r| r.label.as_deref()),
            Some("Ouvert")
        );

        let odd: RawStatus = serde_json::from_value(json!(3)).unwrap();
        assert_eq!(odd.candidate(), None);
    }

    #[test]
    fn patch_skips_absent_fields() {
        let patch = RawInterventionPatch {
            title: Some("Fuite vérin".into()),
            ..RawInterventionPatch::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({ "title": "Fuite vérin" })
        );
    }
}
