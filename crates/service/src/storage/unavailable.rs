use async_trait::async_trait;

use super::{Document, DocumentStore, StoreInfo};
use crate::errors::StoreError;

/// Stand-in used when no database is configured or the connection could not
/// be established at startup. Every data operation fails as unavailable.
#[derive(Debug, Clone, Default)]
pub struct UnavailableStore {
    configured: bool,
    reason: Option<String>,
}

impl UnavailableStore {
    /// No database configured.
    pub fn not_configured() -> Self {
        Self::default()
    }

    /// A database was configured but connecting failed.
    pub fn failed(reason: impl Into<String>) -> Self {
        Self { configured: true, reason: Some(reason.into()) }
    }

    fn error(&self) -> StoreError {
        StoreError::Unavailable(self.reason.clone().unwrap_or_else(|| "no database configured".into()))
    }
}

#[async_trait]
impl DocumentStore for UnavailableStore {
    async fn create(&self, _collection: &str, _document: Document) -> Result<(), StoreError> {
        Err(self.error())
    }

    async fn create_if_absent(&self, _collection: &str, _key_field: &str, _document: Document) -> Result<bool, StoreError> {
        Err(self.error())
    }

    async fn fetch(&self, _collection: &str, _filter: &Document, _limit: Option<u64>) -> Result<Vec<Document>, StoreError> {
        Err(self.error())
    }

    async fn list_collections(&self, _limit: usize) -> Result<Vec<String>, StoreError> {
        Err(self.error())
    }

    fn describe(&self) -> StoreInfo {
        StoreInfo {
            backend: "none",
            configured: self.configured,
            connected: false,
            database_name: None,
            error: self.reason.clone(),
        }
    }
}
