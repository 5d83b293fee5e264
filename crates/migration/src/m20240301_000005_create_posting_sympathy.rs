//! Create `posting_sympathy` table.
//! At most one row per (user, posting); toggling updates the row in place.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PostingSympathy::Table)
                    .if_not_exists()
                    .col(uuid(PostingSympathy::Id).primary_key())
                    .col(uuid(PostingSympathy::PostingId).not_null())
                    .col(uuid(PostingSympathy::UserId).not_null())
                    .col(string_len(PostingSympathy::Status, 8).not_null())
                    .col(timestamp_with_time_zone(PostingSympathy::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(PostingSympathy::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posting_sympathy_posting")
                            .from(PostingSympathy::Table, PostingSympathy::PostingId)
                            .to(Posting::Table, Posting::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posting_sympathy_user")
                            .from(PostingSympathy::Table, PostingSympathy::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uniq_posting_sympathy_user_posting")
                    .table(PostingSympathy::Table)
                    .col(PostingSympathy::UserId)
                    .col(PostingSympathy::PostingId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PostingSympathy::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum PostingSympathy { Table, Id, PostingId, UserId, Status, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Posting { Table, Id }

#[derive(DeriveIden)]
enum User { Table, Id }
