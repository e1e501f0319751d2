// ── Backend-to-domain type conversions ──
//
// Bridges raw `cmms_api::models` rows into canonical `cmms_core::model`
// domain types, and update DTOs back into backend patch bodies. Each `From`
// impl renames fields, parses timestamps, normalizes statuses and fills
// defaults for missing optional data. Nothing here performs I/O.

use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use secrecy::SecretString;

use cmms_api::models::{
    RawAction, RawActionPatch, RawAuthTokens, RawFragmentation, RawFragmentationItem, RawId,
    RawIntervention, RawInterventionPatch, RawMachine, RawPreventiveSuggestion,
    RawPurchaseRequest, RawPurchaseRequestPatch, RawRole, RawServiceStatus, RawSiteConsumption,
    RawSiteConsumptionItem, RawStatus, RawStatusRef, RawStockItem, RawStockPatch,
    RawSubcategory, RawSuggestionPatch, RawSupplier, RawSupplierOrder, RawSupplierOrderPatch,
    RawTimeBreakdown, RawUser, Relation,
};

use crate::model::{
    ActionSubcategory, ActionUpdate, AuthTokens, AuthUser, EntityId, Fragmentation,
    FragmentationItem, Intervention, InterventionAction, InterventionStatus,
    InterventionStatusRef, InterventionUpdate, Machine, MachineRef, PreventiveSuggestion,
    PurchaseRequest, PurchaseRequestStatus, PurchaseRequestUpdate, Role, ServiceLevel,
    ServiceStatus, ServiceStatuses, SiteConsumption, SiteConsumptionItem, StatusFamily,
    StockItem, StockUpdate, SuggestionDecision, SuggestionStatus, SupplierOrder,
    SupplierOrderStatus, SupplierOrderUpdate, SupplierRef, TimeBreakdown,
};
use crate::normalize::{
    normalize_intervention_status, normalize_purchase_request_status,
    normalize_suggestion_status, normalize_supplier_order_status, normalize_value,
};

// ── Helpers ────────────────────────────────────────────────────────

/// Parse a backend timestamp. Accepts RFC 3339, a zone-less datetime
/// (read as UTC) or a bare date (midnight UTC). Unparseable input is dropped.
pub(crate) fn parse_datetime(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let s = raw?.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Timestamp in the form the backend writes: `2024-03-01T08:30:00Z`.
pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn entity_id(raw: Option<RawId>) -> Option<EntityId> {
    raw.map(EntityId::from)
}

fn raw_id(id: Option<&EntityId>) -> Option<RawId> {
    id.map(RawId::from)
}

/// Share of `part` in `total`, in percent. Zero when there is no total.
fn percent(part: f64, total: f64) -> f64 {
    if total > 0.0 { part / total * 100.0 } else { 0.0 }
}

// ── Auth ───────────────────────────────────────────────────────────

impl From<RawAuthTokens> for AuthTokens {
    fn from(raw: RawAuthTokens) -> Self {
        Self {
            access_token: SecretString::from(raw.access_token),
            refresh_token: raw.refresh_token.map(SecretString::from),
            expires_in: raw.expires.map(Duration::from_millis),
        }
    }
}

impl From<RawRole> for Role {
    fn from(raw: RawRole) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
        }
    }
}

impl From<RawUser> for AuthUser {
    fn from(raw: RawUser) -> Self {
        let role = raw.role.map(|relation| match relation {
            Relation::Expanded(role) => Role::from(*role),
            Relation::Key(key) => Role {
                id: key.to_key(),
                name: None,
            },
        });
        Self {
            id: raw.id,
            email: raw.email.unwrap_or_default(),
            first_name: raw.first_name,
            last_name: raw.last_name,
            role,
        }
    }
}

pub fn map_auth_tokens_to_domain(raw: Option<RawAuthTokens>) -> Option<AuthTokens> {
    raw.map(AuthTokens::from)
}

pub fn map_user_to_domain(raw: Option<RawUser>) -> Option<AuthUser> {
    raw.map(AuthUser::from)
}

// ── Machine ────────────────────────────────────────────────────────

impl From<RawMachine> for Machine {
    fn from(raw: RawMachine) -> Self {
        let is_active = raw
            .status
            .as_deref()
            .is_none_or(|status| !status.eq_ignore_ascii_case("archived"));
        Self {
            id: raw.id.into(),
            code: raw.code,
            name: raw.name,
            location: raw.location,
            parent_id: entity_id(raw.parent_id),
            is_active,
        }
    }
}

impl From<RawMachine> for MachineRef {
    fn from(raw: RawMachine) -> Self {
        Self {
            id: raw.id.into(),
            code: raw.code,
            name: raw.name,
        }
    }
}

impl From<Relation<RawMachine>> for MachineRef {
    fn from(relation: Relation<RawMachine>) -> Self {
        match relation {
            Relation::Expanded(machine) => Self::from(*machine),
            Relation::Key(key) => Self {
                id: key.into(),
                code: None,
                name: None,
            },
        }
    }
}

pub fn map_machine_to_domain(raw: Option<RawMachine>) -> Option<Machine> {
    raw.map(Machine::from)
}

// ── Intervention ───────────────────────────────────────────────────

impl From<RawIntervention> for Intervention {
    fn from(raw: RawIntervention) -> Self {
        let status = normalize_intervention_status(
            raw.status_actual.as_ref(),
            InterventionStatus::DEFAULT,
        );
        let status_label = raw
            .status_actual
            .as_ref()
            .and_then(RawStatus::as_ref_row)
            .and_then(|row| row.label.clone());
        Self {
            id: raw.id.into(),
            code: raw.code,
            title: raw.title,
            status,
            status_label,
            machine: raw.machine_id.map(MachineRef::from),
            priority: raw.priority,
            reported_at: parse_datetime(raw.reported_date.as_deref()),
            closed_at: parse_datetime(raw.closed_date.as_deref()),
            assigned_to: raw.tech_initials,
        }
    }
}

impl From<RawStatusRef> for InterventionStatusRef {
    fn from(raw: RawStatusRef) -> Self {
        let value = normalize_value(raw.value.as_deref(), InterventionStatus::DEFAULT);
        let label = raw
            .label
            .or(raw.value)
            .unwrap_or_else(|| value.to_string());
        Self {
            id: entity_id(raw.id),
            value,
            label,
            color: raw.color,
        }
    }
}

pub fn map_intervention_to_domain(raw: Option<RawIntervention>) -> Option<Intervention> {
    raw.map(Intervention::from)
}

pub fn map_intervention_status_to_domain(
    raw: Option<RawStatusRef>,
) -> Option<InterventionStatusRef> {
    raw.map(InterventionStatusRef::from)
}

pub fn map_intervention_domain_to_backend(update: &InterventionUpdate) -> RawInterventionPatch {
    RawInterventionPatch {
        code: update.code.clone(),
        title: update.title.clone(),
        status_actual: update.status.map(|s| s.as_ref().to_owned()),
        machine_id: raw_id(update.machine_id.as_ref()),
        priority: update.priority.clone(),
        reported_date: update.reported_at.as_ref().map(format_datetime),
        closed_date: update.closed_at.as_ref().map(format_datetime),
        tech_initials: update.assigned_to.clone(),
    }
}

// ── Intervention action ────────────────────────────────────────────

impl From<Relation<RawSubcategory>> for ActionSubcategory {
    fn from(relation: Relation<RawSubcategory>) -> Self {
        match relation {
            Relation::Expanded(sub) => Self {
                id: sub.id.into(),
                code: sub.code,
                name: sub.name,
            },
            Relation::Key(key) => Self {
                id: key.into(),
                code: None,
                name: None,
            },
        }
    }
}

impl From<RawAction> for InterventionAction {
    fn from(raw: RawAction) -> Self {
        Self {
            id: raw.id.into(),
            intervention_id: entity_id(raw.intervention_id),
            description: raw.description,
            time_spent_hours: raw.time_spent.unwrap_or(0.0),
            subcategory: raw.action_subcategory.map(ActionSubcategory::from),
            technician: raw.tech,
            created_at: parse_datetime(raw.created_at.as_deref()),
        }
    }
}

pub fn map_action_to_domain(raw: Option<RawAction>) -> Option<InterventionAction> {
    raw.map(InterventionAction::from)
}

pub fn map_action_domain_to_backend(update: &ActionUpdate) -> RawActionPatch {
    RawActionPatch {
        intervention_id: raw_id(update.intervention_id.as_ref()),
        description: update.description.clone(),
        time_spent: update.time_spent_hours,
        action_subcategory: raw_id(update.subcategory_id.as_ref()),
        tech: update.technician.clone(),
    }
}

// ── Preventive suggestion ──────────────────────────────────────────

impl From<RawPreventiveSuggestion> for PreventiveSuggestion {
    fn from(raw: RawPreventiveSuggestion) -> Self {
        let machine_id = raw.machine_id.as_ref().map(|relation| match relation {
            Relation::Expanded(machine) => EntityId::from(machine.id.clone()),
            Relation::Key(key) => EntityId::from(key.clone()),
        });
        let machine = raw
            .machine_id
            .filter(|relation| relation.expanded().is_some())
            .map(MachineRef::from);
        Self {
            id: raw.id.into(),
            machine_id,
            preventive_code: raw.preventive_code,
            preventive_label: raw.preventive_label,
            score: raw.score.unwrap_or(0.0),
            status: normalize_suggestion_status(raw.status.as_ref(), SuggestionStatus::DEFAULT),
            detected_at: parse_datetime(raw.detected_at.as_deref()),
            handled_at: parse_datetime(raw.handled_at.as_deref()),
            handled_by: entity_id(raw.handled_by),
            intervention_action_id: entity_id(raw.intervention_action_id),
            machine,
        }
    }
}

pub fn map_suggestion_to_domain(
    raw: Option<RawPreventiveSuggestion>,
) -> Option<PreventiveSuggestion> {
    raw.map(PreventiveSuggestion::from)
}

pub fn map_suggestion_domain_to_backend(decision: &SuggestionDecision) -> RawSuggestionPatch {
    RawSuggestionPatch {
        status: Some(decision.status.backend_value().to_owned()),
        handled_at: decision.handled_at.as_ref().map(format_datetime),
        handled_by: raw_id(decision.handled_by.as_ref()),
    }
}

// ── Stock ──────────────────────────────────────────────────────────

impl From<RawStockItem> for StockItem {
    fn from(raw: RawStockItem) -> Self {
        Self {
            id: raw.id.into(),
            reference: raw.reference,
            name: raw.name,
            quantity: raw.quantity.unwrap_or(0.0),
            min_quantity: raw.min_quantity,
            unit: raw.unit,
            location: raw.location,
        }
    }
}

pub fn map_stock_item_to_domain(raw: Option<RawStockItem>) -> Option<StockItem> {
    raw.map(StockItem::from)
}

pub fn map_stock_domain_to_backend(update: &StockUpdate) -> RawStockPatch {
    RawStockPatch {
        quantity: update.quantity,
        min_quantity: update.min_quantity,
        location: update.location.clone(),
    }
}

// ── Purchase request ───────────────────────────────────────────────

impl From<RawPurchaseRequest> for PurchaseRequest {
    fn from(raw: RawPurchaseRequest) -> Self {
        Self {
            id: raw.id.into(),
            item_label: raw.item_label,
            quantity: raw.quantity.unwrap_or(0.0),
            unit: raw.unit,
            urgency: raw.urgency,
            status: normalize_purchase_request_status(
                raw.status.as_ref(),
                PurchaseRequestStatus::DEFAULT,
            ),
            requested_by: raw.requested_by,
            intervention_id: entity_id(raw.intervention_id),
            stock_item_id: entity_id(raw.stock_item_id),
            created_at: parse_datetime(raw.created_at.as_deref()),
        }
    }
}

pub fn map_purchase_request_to_domain(raw: Option<RawPurchaseRequest>) -> Option<PurchaseRequest> {
    raw.map(PurchaseRequest::from)
}

pub fn map_purchase_request_domain_to_backend(
    update: &PurchaseRequestUpdate,
) -> RawPurchaseRequestPatch {
    RawPurchaseRequestPatch {
        item_label: update.item_label.clone(),
        quantity: update.quantity,
        unit: update.unit.clone(),
        urgency: update.urgency.clone(),
        status: update.status.map(|s| s.as_ref().to_owned()),
        requested_by: update.requested_by.clone(),
        intervention_id: raw_id(update.intervention_id.as_ref()),
        stock_item_id: raw_id(update.stock_item_id.as_ref()),
    }
}

// ── Supplier order ─────────────────────────────────────────────────

impl From<Relation<RawSupplier>> for SupplierRef {
    fn from(relation: Relation<RawSupplier>) -> Self {
        match relation {
            Relation::Expanded(supplier) => Self {
                id: supplier.id.into(),
                name: supplier.name,
            },
            Relation::Key(key) => Self {
                id: key.into(),
                name: None,
            },
        }
    }
}

impl From<RawSupplierOrder> for SupplierOrder {
    fn from(raw: RawSupplierOrder) -> Self {
        Self {
            id: raw.id.into(),
            order_number: raw.order_number,
            supplier: raw.supplier_id.map(SupplierRef::from),
            status: normalize_supplier_order_status(
                raw.status.as_ref(),
                SupplierOrderStatus::DEFAULT,
            ),
            total_amount: raw.total_amount,
            ordered_at: parse_datetime(raw.ordered_at.as_deref()),
            received_at: parse_datetime(raw.received_at.as_deref()),
            line_count: raw.lines.map_or(0, |lines| lines.len()),
        }
    }
}

pub fn map_supplier_order_to_domain(raw: Option<RawSupplierOrder>) -> Option<SupplierOrder> {
    raw.map(SupplierOrder::from)
}

pub fn map_supplier_order_domain_to_backend(update: &SupplierOrderUpdate) -> RawSupplierOrderPatch {
    RawSupplierOrderPatch {
        status: update.status.map(|s| s.as_ref().to_owned()),
        total_amount: update.total_amount,
        ordered_at: update.ordered_at.as_ref().map(format_datetime),
        received_at: update.received_at.as_ref().map(format_datetime),
    }
}

// ── Service statistics ─────────────────────────────────────────────

// Breakdown-repair share of total hours.
const CHARGE_WARNING: f64 = 40.0;
const CHARGE_CRITICAL: f64 = 60.0;
// Fragmented-work share of total hours.
const FRAG_WARNING: f64 = 10.0;
const FRAG_CRITICAL: f64 = 20.0;
// Piloting share: too little is the problem.
const PILOT_WARNING: f64 = 10.0;
const PILOT_CRITICAL: f64 = 5.0;
// Short actions as a share of all actions.
const SHORT_ACTIONS_WARNING: f64 = 30.0;
const SHORT_ACTIONS_CRITICAL: f64 = 50.0;

/// Level for an indicator where higher is worse.
fn level_above(value: f64, warning: f64, critical: f64) -> ServiceLevel {
    if value >= critical {
        ServiceLevel::Critical
    } else if value >= warning {
        ServiceLevel::Warning
    } else {
        ServiceLevel::Ok
    }
}

/// Level for an indicator where lower is worse.
fn level_below(value: f64, warning: f64, critical: f64) -> ServiceLevel {
    if value < critical {
        ServiceLevel::Critical
    } else if value < warning {
        ServiceLevel::Warning
    } else {
        ServiceLevel::Ok
    }
}

impl From<RawTimeBreakdown> for TimeBreakdown {
    fn from(raw: RawTimeBreakdown) -> Self {
        Self {
            prod: raw.prod.unwrap_or(0.0),
            dep: raw.dep.unwrap_or(0.0),
            pilot: raw.pilot.unwrap_or(0.0),
            frag: raw.frag.unwrap_or(0.0),
        }
    }
}

impl From<RawFragmentationItem> for FragmentationItem {
    fn from(raw: RawFragmentationItem) -> Self {
        Self {
            code: raw.code,
            label: raw.label,
            count: raw.count.unwrap_or(0),
            hours: raw.hours.unwrap_or(0.0),
        }
    }
}

impl From<RawSiteConsumptionItem> for SiteConsumptionItem {
    fn from(raw: RawSiteConsumptionItem) -> Self {
        Self {
            site_id: entity_id(raw.site_id),
            site_name: raw.site_name,
            service_hours: raw.service_hours.unwrap_or(0.0),
            frag_hours: raw.frag_hours.unwrap_or(0.0),
        }
    }
}

impl From<RawSiteConsumption> for SiteConsumption {
    fn from(raw: RawSiteConsumption) -> Self {
        let items: Vec<SiteConsumptionItem> =
            raw.items.into_iter().map(SiteConsumptionItem::from).collect();
        Self {
            total_service_hours: raw
                .total_service_hours
                .unwrap_or_else(|| items.iter().map(|i| i.service_hours).sum()),
            total_frag_hours: raw
                .total_frag_hours
                .unwrap_or_else(|| items.iter().map(|i| i.frag_hours).sum()),
            items,
        }
    }
}

fn fragmentation(raw: RawFragmentation, short_actions_percent: f64) -> Fragmentation {
    let items: Vec<FragmentationItem> =
        raw.items.into_iter().map(FragmentationItem::from).collect();
    Fragmentation {
        total: raw
            .total
            .unwrap_or_else(|| items.iter().map(|i| i.count).sum()),
        items,
        status: level_above(
            short_actions_percent,
            SHORT_ACTIONS_WARNING,
            SHORT_ACTIONS_CRITICAL,
        ),
    }
}

impl From<RawServiceStatus> for ServiceStatus {
    fn from(raw: RawServiceStatus) -> Self {
        let time_breakdown = raw
            .time_breakdown
            .map(TimeBreakdown::from)
            .unwrap_or_default();
        let total_hours = raw.total_hours.unwrap_or_else(|| time_breakdown.total());

        let charge_percent = raw
            .charge_percent
            .unwrap_or_else(|| percent(time_breakdown.dep, total_hours));
        let frag_percent = raw
            .frag_percent
            .unwrap_or_else(|| percent(time_breakdown.frag, total_hours));
        let pilot_percent = raw
            .pilot_percent
            .unwrap_or_else(|| percent(time_breakdown.pilot, total_hours));

        let raw_fragmentation = raw.fragmentation.unwrap_or_default();
        let short_actions_percent = raw.short_actions_percent.unwrap_or_else(|| {
            let short = raw_fragmentation.total.unwrap_or_else(|| {
                raw_fragmentation
                    .items
                    .iter()
                    .map(|i| i.count.unwrap_or(0))
                    .sum()
            });
            raw.action_count
                .map_or(0.0, |count| percent(f64::from(short), f64::from(count)))
        });

        Self {
            charge_percent,
            frag_percent,
            pilot_percent,
            short_actions_percent,
            time_breakdown,
            total_hours,
            fragmentation: fragmentation(raw_fragmentation, short_actions_percent),
            site_consumption: SiteConsumption::from(raw.site_consumption.unwrap_or_default()),
            statuses: ServiceStatuses {
                charge: level_above(charge_percent, CHARGE_WARNING, CHARGE_CRITICAL),
                frag: level_above(frag_percent, FRAG_WARNING, FRAG_CRITICAL),
                pilot: level_below(pilot_percent, PILOT_WARNING, PILOT_CRITICAL),
            },
        }
    }
}

pub fn map_service_status_to_domain(raw: Option<RawServiceStatus>) -> Option<ServiceStatus> {
    raw.map(ServiceStatus::from)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn decode<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> T {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn datetime_accepts_backend_forms() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap();
        assert_eq!(parse_datetime(Some("2024-03-01T08:30:00Z")), Some(expected));
        assert_eq!(parse_datetime(Some("2024-03-01T09:30:00+01:00")), Some(expected));
        assert_eq!(parse_datetime(Some("2024-03-01T08:30:00")), Some(expected));
        assert_eq!(
            parse_datetime(Some("2024-03-01")),
            Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_datetime(Some("yesterday")), None);
        assert_eq!(parse_datetime(None), None);
        assert_eq!(format_datetime(&expected), "2024-03-01T08:30:00Z");
    }

    #[test]
    fn absent_rows_map_to_none() {
        assert!(map_intervention_to_domain(None).is_none());
        assert!(map_action_to_domain(None).is_none());
        assert!(map_suggestion_to_domain(None).is_none());
        assert!(map_service_status_to_domain(None).is_none());
        assert!(map_stock_item_to_domain(None).is_none());
        assert!(map_purchase_request_to_domain(None).is_none());
        assert!(map_supplier_order_to_domain(None).is_none());
        assert!(map_machine_to_domain(None).is_none());
        assert!(map_user_to_domain(None).is_none());
        assert!(map_auth_tokens_to_domain(None).is_none());
        assert!(map_intervention_status_to_domain(None).is_none());
    }

    #[test]
    fn intervention_with_expanded_relations() {
        let raw: RawIntervention = decode(json!({
            "id": 7,
            "code": "INT-0007",
            "title": "Fuite vérin",
            "status_actual": { "id": "encours", "value": "IN_PROGRESS", "label": "En cours" },
            "machine_id": { "id": 3, "code": "PRS-01", "name": "Presse 1" },
            "reported_date": "2024-03-01T08:30:00",
            "tech_initials": "JD"
        }));
        let intervention = Intervention::from(raw);

        assert_eq!(intervention.id, EntityId::Int(7));
        assert_eq!(intervention.status, InterventionStatus::InProgress);
        assert_eq!(intervention.status_label.as_deref(), Some("En cours"));
        assert_eq!(
            intervention.machine,
            Some(MachineRef {
                id: EntityId::Int(3),
                code: Some("PRS-01".into()),
                name: Some("Presse 1".into()),
            })
        );
        assert!(intervention.reported_at.is_some());
        assert_eq!(intervention.closed_at, None);
        assert_eq!(intervention.assigned_to.as_deref(), Some("JD"));
    }

    #[test]
    fn intervention_with_bare_keys_and_no_status() {
        let raw: RawIntervention = decode(json!({ "id": "x-1", "machine_id": 3 }));
        let intervention = Intervention::from(raw);

        assert_eq!(intervention.status, InterventionStatus::Open);
        assert_eq!(intervention.status_label, None);
        assert_eq!(intervention.machine.unwrap().label(), "3");
    }

    #[test]
    fn status_ref_label_falls_back_to_value() {
        let raw: RawStatusRef = decode(json!({ "id": "ferme", "value": "closed" }));
        let status = InterventionStatusRef::from(raw);
        assert_eq!(status.value, InterventionStatus::Closed);
        assert_eq!(status.label, "closed");
    }

    #[test]
    fn suggestion_defaults_score_and_status() {
        let raw: RawPreventiveSuggestion = decode(json!({ "id": 1, "machine_id": 4 }));
        let suggestion = PreventiveSuggestion::from(raw);

        assert!(suggestion.score.abs() < f64::EPSILON);
        assert_eq!(suggestion.status, SuggestionStatus::New);
        assert_eq!(suggestion.machine_id, Some(EntityId::Int(4)));
        assert_eq!(suggestion.machine, None);
    }

    #[test]
    fn suggestion_keeps_expanded_machine() {
        let raw: RawPreventiveSuggestion = decode(json!({
            "id": 1,
            "machine_id": { "id": 4, "code": "CMP-02" },
            "score": 0.82,
            "status": "ACCEPTED",
            "handled_by": "u-9"
        }));
        let suggestion = PreventiveSuggestion::from(raw);

        assert_eq!(suggestion.machine_id, Some(EntityId::Int(4)));
        assert_eq!(
            suggestion.machine.and_then(|m| m.code).as_deref(),
            Some("CMP-02")
        );
        assert_eq!(suggestion.status, SuggestionStatus::Accepted);
        assert_eq!(suggestion.handled_by, Some(EntityId::Text("u-9".into())));
    }

    #[test]
    fn numeric_defaults_are_zero() {
        let action = InterventionAction::from(decode::<RawAction>(json!({ "id": 1 })));
        assert!(action.time_spent_hours.abs() < f64::EPSILON);

        let item = StockItem::from(decode::<RawStockItem>(json!({ "id": 1, "ref": "R-10" })));
        assert!(item.quantity.abs() < f64::EPSILON);
        assert_eq!(item.reference.as_deref(), Some("R-10"));

        let request =
            PurchaseRequest::from(decode::<RawPurchaseRequest>(json!({ "id": 1, "status": null })));
        assert!(request.quantity.abs() < f64::EPSILON);
        assert_eq!(request.status, PurchaseRequestStatus::Open);
    }

    #[test]
    fn supplier_order_counts_lines() {
        let order = SupplierOrder::from(decode::<RawSupplierOrder>(json!({
            "id": 5,
            "supplier_id": { "id": 2, "name": "Acme" },
            "status": "RECEIVED",
            "lines": [10, 11, 12]
        })));
        assert_eq!(order.line_count, 3);
        assert_eq!(order.status, SupplierOrderStatus::Received);
        assert_eq!(order.supplier.and_then(|s| s.name).as_deref(), Some("Acme"));
    }

    #[test]
    fn machine_archived_is_inactive() {
        let machine = Machine::from(decode::<RawMachine>(json!({ "id": 1, "status": "ARCHIVED" })));
        assert!(!machine.is_active);
        let machine = Machine::from(decode::<RawMachine>(json!({ "id": 2 })));
        assert!(machine.is_active);
    }

    #[test]
    fn user_role_key_or_row() {
        let user = AuthUser::from(decode::<RawUser>(json!({
            "id": "u-1",
            "email": "a@b.com",
            "role": "r-1"
        })));
        assert_eq!(user.role.as_ref().unwrap().id, "r-1");
        assert_eq!(user.display_name(), "a@b.com");
    }

    #[test]
    fn tokens_carry_lifetime() {
        let tokens = AuthTokens::from(decode::<RawAuthTokens>(json!({
            "access_token": "abc",
            "expires": 900_000
        })));
        assert_eq!(tokens.expires_in, Some(Duration::from_secs(900)));
        assert!(tokens.refresh_token.is_none());
    }

    // ── Reverse mapping ──

    #[test]
    fn intervention_patch_holds_only_supplied_fields() {
        let update = InterventionUpdate {
            status: Some(InterventionStatus::InProgress),
            machine_id: Some(EntityId::Int(3)),
            ..InterventionUpdate::default()
        };
        let body = serde_json::to_value(map_intervention_domain_to_backend(&update)).unwrap();
        assert_eq!(body, json!({ "status_actual": "in_progress", "machine_id": 3 }));
    }

    #[test]
    fn empty_update_is_empty_patch() {
        let body =
            serde_json::to_value(map_action_domain_to_backend(&ActionUpdate::default())).unwrap();
        assert_eq!(body, json!({}));
        let body =
            serde_json::to_value(map_stock_domain_to_backend(&StockUpdate::default())).unwrap();
        assert_eq!(body, json!({}));
    }

    #[test]
    fn action_patch_uses_backend_names() {
        let update = ActionUpdate {
            time_spent_hours: Some(1.5),
            subcategory_id: Some(EntityId::Int(12)),
            technician: Some("JD".into()),
            ..ActionUpdate::default()
        };
        let body = serde_json::to_value(map_action_domain_to_backend(&update)).unwrap();
        assert_eq!(
            body,
            json!({ "time_spent": 1.5, "action_subcategory": 12, "tech": "JD" })
        );
    }

    #[test]
    fn suggestion_patch_uses_upper_case_status() {
        let decision = SuggestionDecision {
            status: SuggestionStatus::Rejected,
            handled_at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap()),
            handled_by: None,
        };
        let body = serde_json::to_value(map_suggestion_domain_to_backend(&decision)).unwrap();
        assert_eq!(
            body,
            json!({ "status": "REJECTED", "handled_at": "2024-03-01T08:30:00Z" })
        );
    }

    #[test]
    fn purchasing_patches_use_snake_case_status() {
        let update = PurchaseRequestUpdate {
            status: Some(PurchaseRequestStatus::Cancelled),
            ..PurchaseRequestUpdate::default()
        };
        let body = serde_json::to_value(map_purchase_request_domain_to_backend(&update)).unwrap();
        assert_eq!(body, json!({ "status": "cancelled" }));

        let update = SupplierOrderUpdate {
            status: Some(SupplierOrderStatus::Confirmed),
            total_amount: Some(120.0),
            ..SupplierOrderUpdate::default()
        };
        let body = serde_json::to_value(map_supplier_order_domain_to_backend(&update)).unwrap();
        assert_eq!(body, json!({ "status": "confirmed", "total_amount": 120.0 }));
    }

    // ── Statistics ──

    #[test]
    fn stats_total_is_sum_of_breakdown() {
        let raw: RawServiceStatus = decode(json!({
            "time_breakdown": { "PROD": 50.0, "DEP": 30.0, "PILOT": 10.0, "FRAG": 10.0 }
        }));
        let stats = ServiceStatus::from(raw);

        assert!((stats.total_hours - 100.0).abs() < 1e-9);
        assert!((stats.charge_percent - 30.0).abs() < 1e-9);
        assert!((stats.frag_percent - 10.0).abs() < 1e-9);
        assert!((stats.pilot_percent - 10.0).abs() < 1e-9);
        assert_eq!(
            stats.statuses,
            ServiceStatuses {
                charge: ServiceLevel::Ok,
                frag: ServiceLevel::Warning,
                pilot: ServiceLevel::Ok,
            }
        );
    }

    #[test]
    fn stats_supplied_total_drives_percentages() {
        let raw: RawServiceStatus = decode(json!({
            "time_breakdown": { "DEP": 30.0, "FRAG": 25.0, "PILOT": 2.0 },
            "total_hours": 50.0
        }));
        let stats = ServiceStatus::from(raw);

        assert!((stats.total_hours - 50.0).abs() < 1e-9);
        assert!((stats.charge_percent - 60.0).abs() < 1e-9);
        assert!((stats.frag_percent - 50.0).abs() < 1e-9);
        assert_eq!(stats.statuses.charge, ServiceLevel::Critical);
        assert_eq!(stats.statuses.frag, ServiceLevel::Critical);
        assert_eq!(stats.statuses.pilot, ServiceLevel::Critical);
    }

    #[test]
    fn stats_supplied_percentages_win() {
        let raw: RawServiceStatus = decode(json!({
            "time_breakdown": { "DEP": 30.0 },
            "charge_percent": 12.5,
            "short_actions_percent": 35.0
        }));
        let stats = ServiceStatus::from(raw);
        assert!((stats.charge_percent - 12.5).abs() < 1e-9);
        assert_eq!(stats.fragmentation.status, ServiceLevel::Warning);
    }

    #[test]
    fn stats_empty_payload_is_all_zero() {
        let stats = ServiceStatus::from(RawServiceStatus::default());
        assert!(stats.total_hours.abs() < f64::EPSILON);
        assert!(stats.charge_percent.abs() < f64::EPSILON);
        assert_eq!(stats.fragmentation.total, 0);
        assert!(stats.site_consumption.items.is_empty());
        // No piloting at all is the worst case for that indicator.
        assert_eq!(stats.statuses.pilot, ServiceLevel::Critical);
    }

    #[test]
    fn stats_fragmentation_and_sites_sum_items() {
        let raw: RawServiceStatus = decode(json!({
            "action_count": 20,
            "fragmentation": {
                "items": [
                    { "code": "NET", "count": 6, "hours": 1.5 },
                    { "code": "REG", "count": 4, "hours": 0.5 }
                ]
            },
            "site_consumption": {
                "items": [
                    { "site_id": 1, "site_name": "Nord", "service_hours": 10.0, "frag_hours": 1.0 },
                    { "site_id": 2, "site_name": "Sud", "service_hours": 5.0 }
                ]
            }
        }));
        let stats = ServiceStatus::from(raw);

        assert_eq!(stats.fragmentation.total, 10);
        assert!((stats.short_actions_percent - 50.0).abs() < 1e-9);
        assert_eq!(stats.fragmentation.status, ServiceLevel::Critical);
        assert!((stats.site_consumption.total_service_hours - 15.0).abs() < 1e-9);
        assert!((stats.site_consumption.total_frag_hours - 1.0).abs() < 1e-9);
    }
}
