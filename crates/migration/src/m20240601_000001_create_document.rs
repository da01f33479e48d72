//! Create `document` table.
//!
//! One row per stored document; `collection` groups rows and `body` keeps the
//! schema-free JSON payload. `seed_key` is only set by keyed inserts and is
//! unique per collection, which makes default seeding a no-op when repeated.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Document::Table)
                    .if_not_exists()
                    .col(uuid(Document::Id).primary_key())
                    .col(string_len(Document::Collection, 128).not_null())
                    .col(
                        ColumnDef::new(Document::SeedKey)
                            .string_len(256)
                            .null(),
                    )
                    .col(json_binary(Document::Body).not_null())
                    .col(timestamp_with_time_zone(Document::CreatedAt).not_null())
                    .to_owned(),
            )
            .await?;

        // NULL seed keys never collide, so plain inserts are unaffected
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_document_collection_seed_key")
                    .table(Document::Table)
                    .col(Document::Collection)
                    .col(Document::SeedKey)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_document_collection_created_at")
                    .table(Document::Table)
                    .col(Document::Collection)
                    .col(Document::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Document::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Document { Table, Id, Collection, SeedKey, Body, CreatedAt }
