// ── Domain model ──
//
// Backend-agnostic value types. Built only by `crate::convert`; callers
// never see a backend field name.

pub mod action;
pub mod auth;
pub mod entity_id;
pub mod intervention;
pub mod machine;
pub mod preventive;
pub mod purchasing;
pub mod stats;
pub mod status;
pub mod stock;

pub use action::{ActionSubcategory, ActionUpdate, InterventionAction};
pub use auth::{AuthTokens, AuthUser, Role};
pub use entity_id::EntityId;
pub use intervention::{Intervention, InterventionFilter, InterventionStatusRef, InterventionUpdate};
pub use machine::{Machine, MachineRef};
pub use preventive::{PreventiveSuggestion, SuggestionDecision};
pub use purchasing::{
    PurchaseRequest, PurchaseRequestUpdate, SupplierOrder, SupplierOrderUpdate, SupplierRef,
};
pub use stats::{
    DateRange, Fragmentation, FragmentationItem, ServiceLevel, ServiceStatus, ServiceStatuses,
    SiteConsumption, SiteConsumptionItem, TimeBreakdown,
};
pub use status::{
    InterventionStatus, PurchaseRequestStatus, StatusFamily, SuggestionStatus,
    SupplierOrderStatus,
};
pub use stock::{StockItem, StockUpdate};
