//! Create `posting` table with FK to `user`.
//!
//! `sympathy_count` is a denormalised tally of YES sympathies used for sorting.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Posting::Table)
                    .if_not_exists()
                    .col(uuid(Posting::Id).primary_key())
                    .col(uuid(Posting::UserId).not_null())
                    .col(ColumnDef::new(Posting::Title).string_len(100).null())
                    .col(text(Posting::Text).not_null())
                    .col(ColumnDef::new(Posting::Tag).string_len(16).null())
                    .col(string_len(Posting::Status, 16).not_null().default("WAITING"))
                    .col(integer(Posting::SympathyCount).not_null().default(0))
                    .col(timestamp_with_time_zone(Posting::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Posting::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posting_user")
                            .from(Posting::Table, Posting::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Posting::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Posting { Table, Id, UserId, Title, Text, Tag, Status, SympathyCount, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum User { Table, Id }
