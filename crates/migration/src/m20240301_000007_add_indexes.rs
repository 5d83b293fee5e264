use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Posting: listing by status, newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_posting_status_created")
                    .table(Posting::Table)
                    .col(Posting::Status)
                    .col(Posting::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // Posting: quota counting per user over a date range
        manager
            .create_index(
                Index::create()
                    .name("idx_posting_user_created")
                    .table(Posting::Table)
                    .col(Posting::UserId)
                    .col(Posting::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_posting_tag")
                    .table(Posting::Table)
                    .col(Posting::Tag)
                    .to_owned(),
            )
            .await?;

        // PostingComment: index on posting_id
        manager
            .create_index(
                Index::create()
                    .name("idx_posting_comment_posting")
                    .table(PostingComment::Table)
                    .col(PostingComment::PostingId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_posting_status_created").table(Posting::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_posting_user_created").table(Posting::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_posting_tag").table(Posting::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_posting_comment_posting").table(PostingComment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Posting { Table, UserId, Status, Tag, CreatedAt }

#[derive(DeriveIden)]
enum PostingComment { Table, PostingId }
