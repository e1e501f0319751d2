// ── Adapters ──
//
// The per-domain facade application code talks to. Each adapter method
// runs datasource + mapper inside exactly one `api_call`, reads through the
// shared `TagCache`, and invalidates the affected tags after every write
// attempt before returning. A failed write may still have been applied, so
// failures invalidate too.

pub mod actions;
pub mod auth;
pub mod interventions;
pub mod machines;
pub mod preventive;
pub mod purchase_requests;
pub mod stats;
pub mod stock;
pub mod supplier_orders;

pub use actions::ActionsAdapter;
pub use auth::AuthAdapter;
pub use interventions::InterventionsAdapter;
pub use machines::MachinesAdapter;
pub use preventive::PreventiveAdapter;
pub use purchase_requests::PurchaseRequestsAdapter;
pub use stats::StatsAdapter;
pub use stock::StockAdapter;
pub use supplier_orders::SupplierOrdersAdapter;

use std::sync::Arc;

use cmms_api::DirectusClient;

use crate::cache::{CacheTag, TagCache};
use crate::model::EntityId;

/// Resource families used as cache tags.
pub mod tags {
    pub const INTERVENTIONS: &str = "interventions";
    pub const INTERVENTION_STATUSES: &str = "intervention_statuses";
    pub const ACTIONS: &str = "actions";
    pub const SUGGESTIONS: &str = "preventive_suggestions";
    pub const STATS: &str = "stats";
    pub const STOCK: &str = "stock";
    pub const PURCHASE_REQUESTS: &str = "purchase_requests";
    pub const SUPPLIER_ORDERS: &str = "supplier_orders";
    pub const MACHINES: &str = "machines";
}

/// Backend handle shared by every adapter.
#[derive(Clone)]
pub(crate) struct Backend {
    pub(crate) client: Arc<DirectusClient>,
    pub(crate) cache: Arc<TagCache>,
}

impl Backend {
    pub(crate) fn new(client: Arc<DirectusClient>, cache: Arc<TagCache>) -> Self {
        Self { client, cache }
    }

    /// Invalidate a family and one of its items.
    pub(crate) fn invalidate_item(&self, family: &str, id: &EntityId) {
        self.cache
            .invalidate_many([CacheTag::family(family), CacheTag::family(family).child(id)]);
    }
}
