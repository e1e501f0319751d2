// ── Cmms facade ──
//
// One value bundling every adapter over a shared client and cache. This is
// what applications hold on to.

use std::sync::Arc;

use cmms_api::{DirectusClient, TokenStore};

use crate::adapter::{
    ActionsAdapter, AuthAdapter, InterventionsAdapter, MachinesAdapter, PreventiveAdapter,
    PurchaseRequestsAdapter, StatsAdapter, StockAdapter, SupplierOrdersAdapter,
};
use crate::cache::TagCache;
use crate::config::CmmsConfig;
use crate::error::CoreError;

/// Entry point to the CMMS data layer.
///
/// Cheap to clone; clones share the HTTP client, token store and cache.
#[derive(Clone)]
pub struct Cmms {
    pub auth: AuthAdapter,
    pub interventions: InterventionsAdapter,
    pub actions: ActionsAdapter,
    pub preventive: PreventiveAdapter,
    pub stats: StatsAdapter,
    pub stock: StockAdapter,
    pub purchase_requests: PurchaseRequestsAdapter,
    pub supplier_orders: SupplierOrdersAdapter,
    pub machines: MachinesAdapter,
    cache: Arc<TagCache>,
}

impl Cmms {
    /// Build the HTTP client from `config` and wire every adapter to it.
    pub fn new(config: &CmmsConfig, tokens: Arc<dyn TokenStore>) -> Result<Self, CoreError> {
        let client = DirectusClient::new(config.base_url.clone(), tokens, &config.transport())
            .map_err(|e| CoreError::new("connect", e))?;
        Ok(Self::with_client(client, TagCache::new(config.cache_ttl)))
    }

    /// Wire every adapter to an existing client and cache.
    pub fn with_client(client: DirectusClient, cache: TagCache) -> Self {
        let client = Arc::new(client);
        let cache = Arc::new(cache);
        Self {
            auth: AuthAdapter::new(Arc::clone(&client), Arc::clone(&cache)),
            interventions: InterventionsAdapter::new(Arc::clone(&client), Arc::clone(&cache)),
            actions: ActionsAdapter::new(Arc::clone(&client), Arc::clone(&cache)),
            preventive: PreventiveAdapter::new(Arc::clone(&client), Arc::clone(&cache)),
            stats: StatsAdapter::new(Arc::clone(&client), Arc::clone(&cache)),
            stock: StockAdapter::new(Arc::clone(&client), Arc::clone(&cache)),
            purchase_requests: PurchaseRequestsAdapter::new(
                Arc::clone(&client),
                Arc::clone(&cache),
            ),
            supplier_orders: SupplierOrdersAdapter::new(Arc::clone(&client), Arc::clone(&cache)),
            machines: MachinesAdapter::new(client, Arc::clone(&cache)),
            cache,
        }
    }

    /// The response cache shared by all adapters.
    pub fn cache(&self) -> &TagCache {
        &self.cache
    }

    /// Drop `tag` and every tag nested under it.
    pub fn invalidate_cache(&self, tag: &str) -> usize {
        self.cache.invalidate(tag)
    }
}
