//! Seed-and-serve resolution of entity lists.
//!
//! A `Resolver` reads a collection, optionally seeds it with its built-in
//! defaults when empty, converts documents into entities and falls back to the
//! defaults whenever the store cannot be used. The outcome is a typed
//! `Resolution` so callers can tell which path produced the items.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use models::{Document, DocumentShape};

use crate::errors::{RecordShapeError, StoreError};
use crate::storage::DocumentStore;

/// Why built-in content was served instead of stored content.
#[derive(Debug, Clone, PartialEq)]
pub enum FallbackReason {
    StoreUnavailable(String),
    StoreError(String),
    /// The store answered but none of its documents could be read.
    NoValidRecords,
}

impl From<StoreError> for FallbackReason {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable(msg) => Self::StoreUnavailable(msg),
            other => Self::StoreError(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// Read from documents that were already stored.
    Stored,
    /// This call seeded the empty collection, then read it back.
    Seeded,
    Fallback(FallbackReason),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<T> {
    pub items: Vec<T>,
    pub source: Source,
    /// Documents that were dropped because they did not fit the entity.
    pub skipped: Vec<RecordShapeError>,
}

impl<T> Resolution<T> {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, Source::Fallback(_))
    }
}

struct Seeding {
    key_field: &'static str,
    /// Set while a seed pass is running and left set if it fails partway, so
    /// the next pass finishes the keyed inserts instead of seeing a populated
    /// collection.
    interrupted: Mutex<bool>,
}

pub struct Resolver<T> {
    store: Arc<dyn DocumentStore>,
    defaults: Vec<T>,
    limit: Option<u64>,
    seeding: Option<Seeding>,
}

impl<T> Resolver<T>
where
    T: DocumentShape + Clone,
{
    pub fn new(store: Arc<dyn DocumentStore>, defaults: Vec<T>) -> Self {
        Self { store, defaults, limit: None, seeding: None }
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Seed the defaults into an empty collection, keyed on `key_field` so a
    /// repeated seed never duplicates a document.
    pub fn seeded_by(mut self, key_field: &'static str) -> Self {
        self.seeding = Some(Seeding { key_field, interrupted: Mutex::new(false) });
        self
    }

    pub fn defaults(&self) -> &[T] {
        &self.defaults
    }

    async fn fetch(&self) -> Result<Vec<Document>, StoreError> {
        self.store.fetch(T::COLLECTION, &Document::new(), self.limit).await
    }

    fn fall_back(&self, reason: FallbackReason, skipped: Vec<RecordShapeError>) -> Resolution<T> {
        warn!(
            collection = T::COLLECTION,
            event = "fallback",
            reason = ?reason,
            skipped = skipped.len(),
            "serving built-in content"
        );
        Resolution { items: self.defaults.clone(), source: Source::Fallback(reason), skipped }
    }

    /// Write the defaults if the collection is empty, or finish a seed pass
    /// that failed partway. Serialized by a lock so concurrent callers seed at
    /// most once; returns how many were inserted.
    pub async fn ensure_seeded(&self) -> Result<usize, StoreError> {
        let Some(seeding) = &self.seeding else { return Ok(0) };
        let mut interrupted = seeding.interrupted.lock().await;

        if *interrupted {
            info!(collection = T::COLLECTION, event = "seed_resume", "finishing interrupted seed");
        } else {
            let existing = self.store.fetch(T::COLLECTION, &Document::new(), Some(1)).await?;
            if !existing.is_empty() {
                debug!(collection = T::COLLECTION, "collection already populated; seeding skipped");
                return Ok(0);
            }
        }

        // keyed inserts: a resumed pass skips what the failed one wrote
        *interrupted = true;
        let mut inserted = 0;
        for item in &self.defaults {
            if self
                .store
                .create_if_absent(T::COLLECTION, seeding.key_field, item.to_document())
                .await?
            {
                inserted += 1;
            }
        }
        *interrupted = false;
        info!(collection = T::COLLECTION, event = "seeded", inserted, "default documents written");
        Ok(inserted)
    }

    async fn seed_interrupted(&self) -> bool {
        match &self.seeding {
            Some(seeding) => *seeding.interrupted.lock().await,
            None => false,
        }
    }

    pub async fn resolve(&self) -> Resolution<T> {
        let mut docs = match self.fetch().await {
            Ok(docs) => docs,
            Err(e) => return self.fall_back(e.into(), Vec::new()),
        };

        let mut source = Source::Stored;
        if docs.is_empty() || self.seed_interrupted().await {
            if self.seeding.is_none() {
                return Resolution { items: Vec::new(), source, skipped: Vec::new() };
            }
            match self.ensure_seeded().await {
                Ok(inserted) if inserted > 0 => source = Source::Seeded,
                Ok(_) => {}
                Err(e) => return self.fall_back(e.into(), Vec::new()),
            }
            docs = match self.fetch().await {
                Ok(docs) => docs,
                Err(e) => return self.fall_back(e.into(), Vec::new()),
            };
            if docs.is_empty() {
                return self.fall_back(
                    FallbackReason::StoreError("collection still empty after seeding".into()),
                    Vec::new(),
                );
            }
        }

        let (items, skipped) = transform::<T>(&docs);
        if items.is_empty() {
            return self.fall_back(FallbackReason::NoValidRecords, skipped);
        }
        Resolution { items, source, skipped }
    }
}

/// Convert documents one by one; a bad document is logged and skipped.
pub fn transform<T: DocumentShape>(docs: &[Document]) -> (Vec<T>, Vec<RecordShapeError>) {
    let mut items = Vec::with_capacity(docs.len());
    let mut skipped = Vec::new();
    for (index, doc) in docs.iter().enumerate() {
        match T::from_document(doc) {
            Ok(item) => items.push(item),
            Err(e) => {
                let err = RecordShapeError {
                    collection: T::COLLECTION.to_string(),
                    index,
                    reason: e.to_string(),
                };
                warn!(collection = T::COLLECTION, index, error = %err.reason, "skipping malformed document");
                skipped.push(err);
            }
        }
    }
    (items, skipped)
}
