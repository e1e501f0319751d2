// ── Status normalizers ──
//
// Collapse whatever the backend stored in a status field (plain string,
// status-reference row, null, legacy junk) into one member of a closed
// enumeration. Matching is case-insensitive and exact; anything else
// yields the caller's default.

use cmms_api::models::RawStatus;

use crate::model::{
    InterventionStatus, PurchaseRequestStatus, StatusFamily, SuggestionStatus,
    SupplierOrderStatus,
};

/// Normalize `input` into the status family `S`, falling back to `default`.
pub fn normalize_status<S: StatusFamily>(input: Option<&RawStatus>, default: S) -> S {
    normalize_value(input.and_then(RawStatus::candidate), default)
}

/// Same as [`normalize_status`] for an already-extracted string.
pub fn normalize_value<S: StatusFamily>(value: Option<&str>, default: S) -> S {
    value
        .and_then(|candidate| candidate.to_lowercase().parse::<S>().ok())
        .unwrap_or(default)
}

pub fn normalize_intervention_status(
    input: Option<&RawStatus>,
    default: InterventionStatus,
) -> InterventionStatus {
    normalize_status(input, default)
}

pub fn normalize_purchase_request_status(
    input: Option<&RawStatus>,
    default: PurchaseRequestStatus,
) -> PurchaseRequestStatus {
    normalize_status(input, default)
}

pub fn normalize_supplier_order_status(
    input: Option<&RawStatus>,
    default: SupplierOrderStatus,
) -> SupplierOrderStatus {
    normalize_status(input, default)
}

pub fn normalize_suggestion_status(
    input: Option<&RawStatus>,
    default: SuggestionStatus,
) -> SuggestionStatus {
    normalize_status(input, default)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use cmms_api::models::RawStatusRef;

    fn text(s: &str) -> RawStatus {
        RawStatus::Text(s.to_owned())
    }

    fn row(value: Option<&str>) -> RawStatus {
        RawStatus::Ref(RawStatusRef {
            id: None,
            value: value.map(str::to_owned),
            label: None,
            color: None,
        })
    }

    #[test]
    fn upper_case_value_normalizes() {
        assert_eq!(
            normalize_intervention_status(Some(&text("CLOSED")), InterventionStatus::DEFAULT),
            InterventionStatus::Closed
        );
        assert_eq!(
            normalize_intervention_status(Some(&text("In_Progress")), InterventionStatus::Open),
            InterventionStatus::InProgress
        );
    }

    #[test]
    fn object_value_field_is_used() {
        assert_eq!(
            normalize_intervention_status(
                Some(&row(Some("in_progress"))),
                InterventionStatus::Open
            ),
            InterventionStatus::InProgress
        );
    }

    #[test]
    fn absent_input_yields_default() {
        assert_eq!(
            normalize_intervention_status(None, InterventionStatus::Open),
            InterventionStatus::Open
        );
        assert_eq!(
            normalize_intervention_status(Some(&row(None)), InterventionStatus::Closed),
            InterventionStatus::Closed
        );
    }

    #[test]
    fn unknown_value_yields_default() {
        assert_eq!(
            normalize_intervention_status(Some(&text("bogus")), InterventionStatus::Open),
            InterventionStatus::Open
        );
        assert_eq!(
            normalize_intervention_status(Some(&text(" open")), InterventionStatus::Closed),
            InterventionStatus::Closed
        );
        let odd = RawStatus::Other(json!(42));
        assert_eq!(
            normalize_supplier_order_status(Some(&odd), SupplierOrderStatus::Open),
            SupplierOrderStatus::Open
        );
    }

    #[test]
    fn families_do_not_leak_into_each_other() {
        // "cancelled" is a purchase-request member but not an intervention one.
        assert_eq!(
            normalize_purchase_request_status(
                Some(&text("Cancelled")),
                PurchaseRequestStatus::Open
            ),
            PurchaseRequestStatus::Cancelled
        );
        assert_eq!(
            normalize_intervention_status(Some(&text("cancelled")), InterventionStatus::Open),
            InterventionStatus::Open
        );
        assert_eq!(
            normalize_supplier_order_status(Some(&text("RECEIVED")), SupplierOrderStatus::Open),
            SupplierOrderStatus::Received
        );
    }

    #[test]
    fn suggestion_wire_values_normalize() {
        assert_eq!(
            normalize_suggestion_status(Some(&text("ACCEPTED")), SuggestionStatus::DEFAULT),
            SuggestionStatus::Accepted
        );
        assert_eq!(
            normalize_suggestion_status(None, SuggestionStatus::DEFAULT),
            SuggestionStatus::New
        );
    }

    #[test]
    fn closure_over_arbitrary_inputs() {
        let inputs = [
            "", "open", "OPEN", "closed", "done", "in progress", "in_progress", "null", "ouvert",
        ];
        for raw in inputs {
            let status = normalize_intervention_status(Some(&text(raw)), InterventionStatus::Open);
            assert!(matches!(
                status,
                InterventionStatus::Open
                    | InterventionStatus::InProgress
                    | InterventionStatus::Closed
            ));
        }
    }
}
