use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, posting, user};

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SympathyStatus {
    #[sea_orm(string_value = "YES")]
    Yes,
    #[sea_orm(string_value = "NO")]
    No,
}

impl SympathyStatus {
    pub fn flipped(self) -> Self {
        match self {
            SympathyStatus::Yes => SympathyStatus::No,
            SympathyStatus::No => SympathyStatus::Yes,
        }
    }
}

/// One row per (user, posting); unique index enforced by migration.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "posting_sympathy")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub posting_id: Uuid,
    pub user_id: Uuid,
    pub status: SympathyStatus,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Posting, User }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Posting => Entity::belongs_to(posting::Entity).from(Column::PostingId).to(posting::Column::Id).into(),
            Relation::User => Entity::belongs_to(user::Entity).from(Column::UserId).to(user::Column::Id).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn find_by_user_and_posting<C: ConnectionTrait>(conn: &C, user_id: Uuid, posting_id: Uuid) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::PostingId.eq(posting_id))
        .one(conn)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn create<C: ConnectionTrait>(conn: &C, user_id: Uuid, posting_id: Uuid, status: SympathyStatus) -> Result<Model, errors::ModelError> {
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        posting_id: Set(posting_id),
        user_id: Set(user_id),
        status: Set(status),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(conn).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flipped_is_an_involution() {
        assert_eq!(SympathyStatus::Yes.flipped(), SympathyStatus::No);
        assert_eq!(SympathyStatus::No.flipped().flipped(), SympathyStatus::No);
    }
}
