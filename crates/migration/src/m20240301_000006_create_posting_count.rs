//! Create `posting_count` and seed the single quota row (id = 1).
use sea_orm_migration::{prelude::*, schema::*};

const QUOTA_ROW_ID: i32 = 1;
const DEFAULT_QUOTA: i32 = 5;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PostingCount::Table)
                    .if_not_exists()
                    .col(integer(PostingCount::Id).primary_key())
                    .col(integer(PostingCount::Count).not_null())
                    .to_owned(),
            )
            .await?;

        let seed = Query::insert()
            .into_table(PostingCount::Table)
            .columns([PostingCount::Id, PostingCount::Count])
            .values_panic([QUOTA_ROW_ID.into(), DEFAULT_QUOTA.into()])
            .on_conflict(OnConflict::column(PostingCount::Id).do_nothing().to_owned())
            .to_owned();
        manager.exec_stmt(seed).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PostingCount::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum PostingCount { Table, Id, Count }
