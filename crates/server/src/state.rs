use std::sync::Arc;

use service::services::{BlogService, ContactService, DiagnosticsService, PricingService};
use service::storage::DocumentStore;

/// Shared handler state. Built once at startup around a single store handle.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub pricing: Arc<PricingService>,
    pub blogs: Arc<BlogService>,
    pub contact: Arc<ContactService>,
    pub diagnostics: Arc<DiagnosticsService>,
}

impl AppState {
    /// `url_set` / `name_set` feed the diagnostics report.
    pub fn new(store: Arc<dyn DocumentStore>, url_set: bool, name_set: bool) -> Self {
        Self {
            pricing: Arc::new(PricingService::new(Arc::clone(&store))),
            blogs: Arc::new(BlogService::new(Arc::clone(&store))),
            contact: Arc::new(ContactService::new(Arc::clone(&store))),
            diagnostics: Arc::new(DiagnosticsService::new(Arc::clone(&store), url_set, name_set)),
            store,
        }
    }
}
