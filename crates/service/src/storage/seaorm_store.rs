use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, OnConflict},
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use models::document;

use super::{key_of, stamp, Document, DocumentStore, StoreInfo};
use crate::errors::StoreError;

/// Postgres-backed store: one `document` row per document, payload in `jsonb`.
pub struct SeaOrmDocumentStore {
    pub db: DatabaseConnection,
    pub database_name: Option<String>,
}

impl SeaOrmDocumentStore {
    pub fn new(db: DatabaseConnection, database_name: Option<String>) -> Self {
        Self { db, database_name }
    }

    fn row(collection: &str, seed_key: Option<String>, mut document: Document) -> document::ActiveModel {
        stamp(&mut document);
        document::ActiveModel {
            id: Set(Uuid::new_v4()),
            collection: Set(collection.to_string()),
            seed_key: Set(seed_key),
            body: Set(Value::Object(document)),
            created_at: Set(Utc::now().into()),
        }
    }
}

/// Connection-level failures mean the store is unavailable; everything else
/// is attributed to the operation.
fn classify(e: DbErr, writing: bool) -> StoreError {
    match e {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => StoreError::Unavailable(e.to_string()),
        _ if writing => StoreError::Write(e.to_string()),
        _ => StoreError::Query(e.to_string()),
    }
}

#[async_trait]
impl DocumentStore for SeaOrmDocumentStore {
    async fn create(&self, collection: &str, document: Document) -> Result<(), StoreError> {
        Self::row(collection, None, document)
            .insert(&self.db)
            .await
            .map_err(|e| classify(e, true))?;
        Ok(())
    }

    async fn create_if_absent(&self, collection: &str, key_field: &str, document: Document) -> Result<bool, StoreError> {
        let key = key_of(&document, key_field)?;
        let res = document::Entity::insert(Self::row(collection, Some(key), document))
            .on_conflict(
                OnConflict::columns([document::Column::Collection, document::Column::SeedKey])
                    .do_nothing()
                    .to_owned(),
            )
            .exec(&self.db)
            .await;
        match res {
            Ok(_) => Ok(true),
            Err(DbErr::RecordNotInserted) => Ok(false),
            Err(e) => Err(classify(e, true)),
        }
    }

    async fn fetch(&self, collection: &str, filter: &Document, limit: Option<u64>) -> Result<Vec<Document>, StoreError> {
        let mut query = document::Entity::find().filter(document::Column::Collection.eq(collection));
        if !filter.is_empty() {
            query = query.filter(Expr::cust_with_values("body @> $1", [Value::Object(filter.clone())]));
        }
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        let rows = query
            .order_by_asc(document::Column::CreatedAt)
            .order_by_asc(document::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| classify(e, false))?;

        Ok(rows
            .into_iter()
            .filter_map(|row| match row.body {
                Value::Object(map) => Some(map),
                other => {
                    warn!(%collection, id = %row.id, kind = ?other, "skipping non-object document body");
                    None
                }
            })
            .collect())
    }

    async fn list_collections(&self, limit: usize) -> Result<Vec<String>, StoreError> {
        document::Entity::find()
            .select_only()
            .column(document::Column::Collection)
            .distinct()
            .order_by_asc(document::Column::Collection)
            .limit(limit as u64)
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(|e| classify(e, false))
    }

    fn describe(&self) -> StoreInfo {
        StoreInfo {
            backend: "postgres",
            configured: true,
            connected: true,
            database_name: self.database_name.clone(),
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    async fn store() -> Option<SeaOrmDocumentStore> {
        if std::env::var("SKIP_DB_TESTS").is_ok() { return None; }
        let url = std::env::var("DATABASE_URL").ok().filter(|u| u.starts_with("postgres"))?;
        let cfg = configs::DatabaseConfig { url, ..Default::default() };
        match models::db::connect_and_migrate(&cfg).await {
            Ok(db) => Some(SeaOrmDocumentStore::new(db, None)),
            Err(e) => {
                eprintln!("skip: cannot connect to db: {}", e);
                None
            }
        }
    }

    #[test]
    fn connection_errors_classify_as_unavailable() {
        let e = classify(DbErr::Conn(sea_orm::RuntimeErr::Internal("refused".into())), false);
        assert!(e.is_unavailable());
        let e = classify(DbErr::Custom("bad".into()), true);
        assert!(matches!(e, StoreError::Write(_)));
        let e = classify(DbErr::Custom("bad".into()), false);
        assert!(matches!(e, StoreError::Query(_)));
    }

    #[tokio::test]
    async fn postgres_roundtrip_and_keyed_insert() -> anyhow::Result<()> {
        let Some(store) = store().await else { return Ok(()) };
        let collection = format!("test_{}", Uuid::new_v4().simple());

        store.create(&collection, json!({"name": "A", "price": 1.0}).as_object().cloned().unwrap()).await?;
        let doc_b = json!({"name": "B", "price": 2.0}).as_object().cloned().unwrap();
        assert!(store.create_if_absent(&collection, "name", doc_b.clone()).await?);
        assert!(!store.create_if_absent(&collection, "name", doc_b).await?);

        let all = store.fetch(&collection, &Document::new(), None).await?;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0]["name"], "A");

        let filter = json!({"name": "B"}).as_object().cloned().unwrap();
        assert_eq!(store.fetch(&collection, &filter, None).await?.len(), 1);
        assert_eq!(store.fetch(&collection, &Document::new(), Some(1)).await?.len(), 1);

        document::Entity::delete_many()
            .filter(document::Column::Collection.eq(collection))
            .exec(&store.db)
            .await?;
        Ok(())
    }
}
