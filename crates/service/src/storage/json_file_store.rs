use std::{collections::BTreeMap, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use tokio::{fs, sync::RwLock};
use tracing::debug;

use super::{key_of, matches, stamp, Document, DocumentStore, StoreInfo};
use crate::errors::StoreError;

type Collections = BTreeMap<String, Vec<Document>>;

/// JSON file-backed document store.
///
/// Keeps every collection in memory and rewrites the whole file on each
/// write. Intended for development and tests where Postgres is overkill.
#[derive(Clone)]
pub struct JsonFileStore {
    inner: Arc<RwLock<Collections>>,
    file_path: PathBuf,
}

impl JsonFileStore {
    /// Open the store at a path. Creates the file with no collections if missing.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, StoreError> {
        let file_path = path.into();
        common::env::ensure_parent_dir(&file_path)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let collections: Collections = match fs::read(&file_path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Collections::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                StoreError::Query(format!("{} is not a document file: {e}", file_path.display()))
            })?,
            Err(_) => {
                let empty = Collections::new();
                write_file(&file_path, &empty).await?;
                empty
            }
        };

        Ok(Arc::new(Self { inner: Arc::new(RwLock::new(collections)), file_path }))
    }

    /// Append under the held write lock; undo the append if persisting fails.
    async fn append(&self, map: &mut Collections, collection: &str, mut document: Document) -> Result<(), StoreError> {
        stamp(&mut document);
        map.entry(collection.to_string()).or_default().push(document);
        if let Err(e) = write_file(&self.file_path, map).await {
            if let Some(docs) = map.get_mut(collection) {
                docs.pop();
                if docs.is_empty() {
                    map.remove(collection);
                }
            }
            return Err(e);
        }
        debug!(%collection, "document appended");
        Ok(())
    }
}

async fn write_file(path: &PathBuf, map: &Collections) -> Result<(), StoreError> {
    let data = serde_json::to_vec_pretty(map).map_err(|e| StoreError::Write(e.to_string()))?;
    fs::write(path, data).await.map_err(|e| StoreError::Write(e.to_string()))
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn create(&self, collection: &str, document: Document) -> Result<(), StoreError> {
        let mut map = self.inner.write().await;
        self.append(&mut map, collection, document).await
    }

    async fn create_if_absent(&self, collection: &str, key_field: &str, document: Document) -> Result<bool, StoreError> {
        let key = key_of(&document, key_field)?;
        let mut map = self.inner.write().await;
        let exists = map
            .get(collection)
            .map_or(false, |docs| docs.iter().any(|d| d.get(key_field).and_then(|v| v.as_str()) == Some(key.as_str())));
        if exists {
            return Ok(false);
        }
        self.append(&mut map, collection, document).await?;
        Ok(true)
    }

    async fn fetch(&self, collection: &str, filter: &Document, limit: Option<u64>) -> Result<Vec<Document>, StoreError> {
        let map = self.inner.read().await;
        let limit = limit.map_or(usize::MAX, |l| usize::try_from(l).unwrap_or(usize::MAX));
        Ok(map
            .get(collection)
            .map(|docs| docs.iter().filter(|d| matches(filter, d)).take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn list_collections(&self, limit: usize) -> Result<Vec<String>, StoreError> {
        let map = self.inner.read().await;
        Ok(map
            .iter()
            .filter(|(_, docs)| !docs.is_empty())
            .map(|(name, _)| name.clone())
            .take(limit)
            .collect())
    }

    fn describe(&self) -> StoreInfo {
        let name = self
            .file_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned());
        StoreInfo { backend: "json-file", configured: true, connected: true, database_name: name, error: None }
    }
}
