// cmms-core: Backend-agnostic data layer between cmms-api and applications.
//
// Applications talk to the adapters (usually through the `Cmms` facade) and
// only ever see the domain types in `model`. Backend payloads, filter
// syntax and HTTP failures stop at this crate's boundary.

pub mod adapter;
pub mod api_call;
pub mod cache;
pub mod config;
pub mod convert;
pub mod error;
pub mod facade;
pub mod model;
pub mod normalize;

// ── Primary re-exports ──────────────────────────────────────────────
pub use adapter::{
    ActionsAdapter, AuthAdapter, InterventionsAdapter, MachinesAdapter, PreventiveAdapter,
    PurchaseRequestsAdapter, StatsAdapter, StockAdapter, SupplierOrdersAdapter,
};
pub use api_call::api_call;
pub use cache::{CacheTag, TagCache};
pub use config::CmmsConfig;
pub use error::{CoreError, ErrorKind};
pub use facade::Cmms;
pub use normalize::{
    normalize_intervention_status, normalize_purchase_request_status,
    normalize_suggestion_status, normalize_supplier_order_status,
};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    // Identity and session
    AuthTokens, AuthUser, EntityId, Role,
    // Equipment and work
    ActionSubcategory, ActionUpdate, Intervention, InterventionAction, InterventionFilter,
    InterventionStatusRef, InterventionUpdate, Machine, MachineRef,
    // Preventive maintenance
    PreventiveSuggestion, SuggestionDecision,
    // Purchasing and stock
    PurchaseRequest, PurchaseRequestUpdate, StockItem, StockUpdate, SupplierOrder,
    SupplierOrderUpdate, SupplierRef,
    // Statistics
    DateRange, ServiceLevel, ServiceStatus,
    // Status families
    InterventionStatus, PurchaseRequestStatus, StatusFamily, SuggestionStatus,
    SupplierOrderStatus,
};
