//! Document store abstraction and its backends.
//!
//! The services only see `DocumentStore`; which backend sits behind it is
//! decided once at startup from the configured database URL.

pub mod json_file_store;
pub mod seaorm_store;
pub mod unavailable;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::Value;

pub use models::Document;

use crate::errors::StoreError;

pub use json_file_store::JsonFileStore;
pub use seaorm_store::SeaOrmDocumentStore;
pub use unavailable::UnavailableStore;

/// Static facts about a backend, used by the diagnostics endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreInfo {
    pub backend: &'static str,
    /// Whether a database was configured at all.
    pub configured: bool,
    /// Whether a live handle exists.
    pub connected: bool,
    pub database_name: Option<String>,
    /// Why the handle is missing, when it is.
    pub error: Option<String>,
}

/// Collection-oriented document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert one document.
    async fn create(&self, collection: &str, document: Document) -> Result<(), StoreError>;

    /// Insert unless a document with the same string value at `key_field`
    /// already exists in the collection. Returns whether it was inserted.
    async fn create_if_absent(
        &self,
        collection: &str,
        key_field: &str,
        document: Document,
    ) -> Result<bool, StoreError>;

    /// Documents whose top-level fields equal every field of `filter`, in
    /// insertion order, at most `limit` of them.
    async fn fetch(
        &self,
        collection: &str,
        filter: &Document,
        limit: Option<u64>,
    ) -> Result<Vec<Document>, StoreError>;

    /// Sorted names of non-empty collections.
    async fn list_collections(&self, limit: usize) -> Result<Vec<String>, StoreError>;

    fn describe(&self) -> StoreInfo;
}

/// Add `created_at`/`updated_at` unless the caller already set them.
pub fn stamp(document: &mut Document) {
    let now = Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
    document.entry("created_at").or_insert_with(|| now.clone());
    document.entry("updated_at").or_insert(now);
}

/// The string stored at `key_field`, required for keyed inserts.
pub fn key_of(document: &Document, key_field: &str) -> Result<String, StoreError> {
    match document.get(key_field) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        _ => Err(StoreError::Write(format!("document has no string `{key_field}` to key on"))),
    }
}

/// Top-level equality match; an empty filter matches everything.
pub fn matches(filter: &Document, document: &Document) -> bool {
    filter.iter().all(|(k, v)| document.get(k) == Some(v))
}
