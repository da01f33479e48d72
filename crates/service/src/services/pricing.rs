use std::sync::Arc;

use models::Plan;
use tracing::instrument;

use crate::defaults::default_plans;
use crate::errors::StoreError;
use crate::resolver::{Resolution, Resolver};
use crate::storage::DocumentStore;

/// Pricing plans: the only collection seeded with defaults.
pub struct PricingService {
    resolver: Resolver<Plan>,
}

impl PricingService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { resolver: Resolver::new(store, default_plans()).seeded_by("name") }
    }

    /// Seed the default plans if the collection is empty. Run once at startup;
    /// reads seed lazily through the same lock when this could not complete.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::services::PricingService;
    /// use service::storage::UnavailableStore;
    /// let svc = PricingService::new(Arc::new(UnavailableStore::not_configured()));
    /// assert!(tokio_test::block_on(svc.ensure_seeded()).is_err());
    /// ```
    pub async fn ensure_seeded(&self) -> Result<usize, StoreError> {
        self.resolver.ensure_seeded().await
    }

    /// Plans from the store, or the defaults when it cannot be used.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::services::PricingService;
    /// use service::storage::UnavailableStore;
    /// let svc = PricingService::new(Arc::new(UnavailableStore::not_configured()));
    /// let res = tokio_test::block_on(svc.list_plans());
    /// assert!(res.is_fallback());
    /// assert_eq!(res.items.len(), 3);
    /// ```
    #[instrument(skip(self))]
    pub async fn list_plans(&self) -> Resolution<Plan> {
        self.resolver.resolve().await
    }
}
