//! `user_credentials`: one argon2 PHC hash per user, keyed by the user id.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let table = Table::create()
            .table(Credentials::Table)
            .if_not_exists()
            .col(uuid(Credentials::UserId).primary_key())
            .col(text(Credentials::PasswordHash))
            .col(timestamp_with_time_zone(Credentials::UpdatedAt))
            .foreign_key(
                ForeignKey::create()
                    .name("fk_credentials_owner")
                    .from(Credentials::Table, Credentials::UserId)
                    .to(Users::Table, Users::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            )
            .to_owned();
        manager.create_table(table).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Credentials::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Credentials {
    #[sea_orm(iden = "user_credentials")]
    Table,
    UserId,
    PasswordHash,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "user")]
    Table,
    Id,
}
