// ── Status families ──
//
// Closed enumerations for every status-bearing entity. Values are only
// built from backend data through `crate::normalize`; the snake_case
// string form is what the backend stores (suggestions use upper case on
// the wire, see `SuggestionStatus::backend_value`).

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// A closed status enumeration with a fallback member.
pub trait StatusFamily: Copy + std::str::FromStr + 'static {
    /// Member used when the backend value is absent or unknown.
    const DEFAULT: Self;
}

/// Lifecycle of an intervention.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InterventionStatus {
    Open,
    InProgress,
    Closed,
}

impl StatusFamily for InterventionStatus {
    const DEFAULT: Self = Self::Open;
}

impl InterventionStatus {
    pub fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }
}

/// Lifecycle of a purchase request.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PurchaseRequestStatus {
    Open,
    InProgress,
    Closed,
    Cancelled,
}

impl StatusFamily for PurchaseRequestStatus {
    const DEFAULT: Self = Self::Open;
}

/// Lifecycle of a supplier order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SupplierOrderStatus {
    Open,
    Confirmed,
    Received,
    Cancelled,
}

impl StatusFamily for SupplierOrderStatus {
    const DEFAULT: Self = Self::Open;
}

/// Review state of a preventive-maintenance suggestion.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "snake_case")]
pub enum SuggestionStatus {
    New,
    Reviewed,
    Accepted,
    Rejected,
}

impl StatusFamily for SuggestionStatus {
    const DEFAULT: Self = Self::New;
}

impl SuggestionStatus {
    /// Upper-case form stored by the backend (`"NEW"`, `"ACCEPTED"`, ...).
    pub fn backend_value(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Reviewed => "REVIEWED",
            Self::Accepted => "ACCEPTED",
            Self::Rejected => "REJECTED",
        }
    }

    /// `true` once someone acted on the suggestion.
    pub fn is_handled(self) -> bool {
        !matches!(self, Self::New)
    }
}
