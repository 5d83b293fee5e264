use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, user};

/// One password per user; the PHC hash string carries its own algorithm and salt.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_credentials")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: Uuid,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(belongs_to = "user::Entity", from = "Column::UserId", to = "user::Column::Id", on_delete = "Cascade")]
    User,
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn find_by_user<C: ConnectionTrait>(conn: &C, user_id: Uuid) -> Result<Option<Model>, errors::ModelError> {
    Entity::find_by_id(user_id).one(conn).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Store the first password of a freshly created user.
pub async fn insert<C: ConnectionTrait>(conn: &C, user_id: Uuid, password_hash: String) -> Result<Model, errors::ModelError> {
    if password_hash.trim().is_empty() {
        return Err(errors::ModelError::Validation("password hash required".into()));
    }
    let am = ActiveModel {
        user_id: Set(user_id),
        password_hash: Set(password_hash),
        updated_at: Set(Utc::now().into()),
    };
    am.insert(conn).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
