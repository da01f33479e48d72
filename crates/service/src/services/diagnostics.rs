//! Store connectivity report served by the `/test` endpoint.

use std::sync::Arc;

use serde::Serialize;

use crate::storage::DocumentStore;

const MAX_COLLECTIONS: usize = 10;
const MAX_ERROR_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatabaseReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

pub struct DiagnosticsService {
    store: Arc<dyn DocumentStore>,
    url_set: bool,
    name_set: bool,
}

fn set_marker(set: bool) -> String {
    if set { "✅ Set".into() } else { "❌ Not Set".into() }
}

fn truncate(msg: &str) -> String {
    msg.chars().take(MAX_ERROR_CHARS).collect()
}

impl DiagnosticsService {
    /// `url_set` / `name_set` say whether configuration carries a database URL
    /// and name; their values are never echoed.
    pub fn new(store: Arc<dyn DocumentStore>, url_set: bool, name_set: bool) -> Self {
        Self { store, url_set, name_set }
    }

    pub async fn report(&self) -> DatabaseReport {
        let info = self.store.describe();
        let mut report = DatabaseReport {
            backend: "✅ Running".into(),
            database: "❌ Not Available".into(),
            database_url: set_marker(self.url_set),
            database_name: set_marker(self.name_set),
            connection_status: "Not Connected".into(),
            collections: Vec::new(),
        };

        if !info.connected {
            if let Some(err) = info.error.as_deref().filter(|_| info.configured) {
                report.database = format!("❌ Error: {}", truncate(err));
            }
            return report;
        }

        report.connection_status = "Connected".into();
        match self.store.list_collections(MAX_COLLECTIONS).await {
            Ok(collections) => {
                report.collections = collections;
                report.database = "✅ Connected & Working".into();
            }
            Err(e) => {
                report.database = format!("⚠️  Connected but Error: {}", truncate(&e.to_string()));
            }
        }
        report
    }
}
