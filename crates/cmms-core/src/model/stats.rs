// ── Service statistics ──
//
// Snapshot of how the maintenance team's time splits across activity
// families over a date window, with threshold-based health levels.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

/// Inclusive calendar window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range, swapping the bounds if given in reverse.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }
}

/// Health level of one indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceLevel {
    Ok,
    Warning,
    Critical,
}

/// Hours per activity family: production support, breakdown repair
/// (dépannage), piloting, and fragmented short tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeBreakdown {
    pub prod: f64,
    pub dep: f64,
    pub pilot: f64,
    pub frag: f64,
}

impl TimeBreakdown {
    pub fn total(&self) -> f64 {
        self.prod + self.dep + self.pilot + self.frag
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragmentation {
    /// Number of short actions in the window.
    pub total: u32,
    pub items: Vec<FragmentationItem>,
    pub status: ServiceLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FragmentationItem {
    pub code: Option<String>,
    pub label: Option<String>,
    pub count: u32,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConsumption {
    pub total_service_hours: f64,
    pub total_frag_hours: f64,
    pub items: Vec<SiteConsumptionItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConsumptionItem {
    pub site_id: Option<EntityId>,
    pub site_name: Option<String>,
    pub service_hours: f64,
    pub frag_hours: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatuses {
    pub charge: ServiceLevel,
    pub frag: ServiceLevel,
    pub pilot: ServiceLevel,
}

/// Service load summary for a date window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceStatus {
    /// Breakdown-repair share of total hours.
    pub charge_percent: f64,
    /// Fragmented-work share of total hours.
    pub frag_percent: f64,
    /// Piloting share of total hours.
    pub pilot_percent: f64,
    /// Short actions as a share of all actions.
    pub short_actions_percent: f64,
    pub time_breakdown: TimeBreakdown,
    pub total_hours: f64,
    pub fragmentation: Fragmentation,
    pub site_consumption: SiteConsumption,
    pub statuses: ServiceStatuses,
}
