//! Create `posting_comment` table; rows go away with their posting or author.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PostingComment::Table)
                    .if_not_exists()
                    .col(uuid(PostingComment::Id).primary_key())
                    .col(uuid(PostingComment::PostingId).not_null())
                    .col(uuid(PostingComment::UserId).not_null())
                    .col(string_len(PostingComment::Text, 500).not_null())
                    .col(timestamp_with_time_zone(PostingComment::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(PostingComment::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posting_comment_posting")
                            .from(PostingComment::Table, PostingComment::PostingId)
                            .to(Posting::Table, Posting::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posting_comment_user")
                            .from(PostingComment::Table, PostingComment::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PostingComment::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum PostingComment { Table, Id, PostingId, UserId, Text, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Posting { Table, Id }

#[derive(DeriveIden)]
enum User { Table, Id }
