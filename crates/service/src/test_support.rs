#![cfg(test)]
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::StoreError;
use crate::storage::{Document, DocumentStore, JsonFileStore, StoreInfo};

/// Fresh JSON file store under the temp dir; callers remove the file when done.
pub async fn temp_store() -> Result<(Arc<JsonFileStore>, PathBuf), anyhow::Error> {
    let path = std::env::temp_dir().join(format!("service_store_{}.json", uuid::Uuid::new_v4()));
    let store = JsonFileStore::open(&path).await?;
    Ok((store, path))
}

#[derive(Clone, Copy)]
enum Mode {
    Unavailable,
    QueryError,
    /// Reads succeed with nothing; writes are rejected.
    EmptyRejectingWrites,
}

/// Store double that fails in a chosen way and counts attempted writes.
pub struct FailingStore {
    mode: Mode,
    writes: AtomicUsize,
}

impl FailingStore {
    fn with(mode: Mode) -> Self { Self { mode, writes: AtomicUsize::new(0) } }
    pub fn unavailable() -> Self { Self::with(Mode::Unavailable) }
    pub fn query_error() -> Self { Self::with(Mode::QueryError) }
    pub fn empty_rejecting_writes() -> Self { Self::with(Mode::EmptyRejectingWrites) }

    pub fn writes(&self) -> usize { self.writes.load(Ordering::SeqCst) }

    fn read_error(&self) -> Option<StoreError> {
        match self.mode {
            Mode::Unavailable => Some(StoreError::Unavailable("connection refused".into())),
            Mode::QueryError => Some(StoreError::Query("malformed response".into())),
            Mode::EmptyRejectingWrites => None,
        }
    }

    fn write_error(&self) -> StoreError {
        self.writes.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            Mode::Unavailable => StoreError::Unavailable("connection refused".into()),
            _ => StoreError::Write("write rejected".into()),
        }
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn create(&self, _collection: &str, _document: Document) -> Result<(), StoreError> {
        Err(self.write_error())
    }

    async fn create_if_absent(&self, _collection: &str, _key_field: &str, _document: Document) -> Result<bool, StoreError> {
        Err(self.write_error())
    }

    async fn fetch(&self, _collection: &str, _filter: &Document, _limit: Option<u64>) -> Result<Vec<Document>, StoreError> {
        match self.read_error() {
            Some(e) => Err(e),
            None => Ok(Vec::new()),
        }
    }

    async fn list_collections(&self, _limit: usize) -> Result<Vec<String>, StoreError> {
        match self.read_error() {
            Some(e) => Err(e),
            None => Ok(Vec::new()),
        }
    }

    fn describe(&self) -> StoreInfo {
        StoreInfo { backend: "failing", configured: true, connected: true, database_name: Some("test".into()), error: None }
    }
}

/// Wraps a real store and fails the `nth` keyed insert (1-based) once.
pub struct FlakyStore {
    inner: Arc<JsonFileStore>,
    fail_on: usize,
    keyed_inserts: AtomicUsize,
}

impl FlakyStore {
    pub fn failing_insert(inner: Arc<JsonFileStore>, nth: usize) -> Self {
        Self { inner, fail_on: nth, keyed_inserts: AtomicUsize::new(0) }
    }
}

#[async_trait]
impl DocumentStore for FlakyStore {
    async fn create(&self, collection: &str, document: Document) -> Result<(), StoreError> {
        self.inner.create(collection, document).await
    }

    async fn create_if_absent(&self, collection: &str, key_field: &str, document: Document) -> Result<bool, StoreError> {
        if self.keyed_inserts.fetch_add(1, Ordering::SeqCst) + 1 == self.fail_on {
            return Err(StoreError::Unavailable("connection reset".into()));
        }
        self.inner.create_if_absent(collection, key_field, document).await
    }

    async fn fetch(&self, collection: &str, filter: &Document, limit: Option<u64>) -> Result<Vec<Document>, StoreError> {
        self.inner.fetch(collection, filter, limit).await
    }

    async fn list_collections(&self, limit: usize) -> Result<Vec<String>, StoreError> {
        self.inner.list_collections(limit).await
    }

    fn describe(&self) -> StoreInfo {
        self.inner.describe()
    }
}
