use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, posting, user};

pub const COMMENT_MAX_CHARS: usize = 500;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "posting_comment")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub posting_id: Uuid,
    pub user_id: Uuid,
    pub text: String,
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

pub fn validate_text(text: &str) -> Result<(), errors::ModelError> {
    if text.trim().is_empty() { return Err(errors::ModelError::Validation("comment required".into())); }
    if text.chars().count() > COMMENT_MAX_CHARS {
        return Err(errors::ModelError::Validation(format!("comment longer than {COMMENT_MAX_CHARS} characters")));
    }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, posting_id: Uuid, user_id: Uuid, text: &str) -> Result<Model, errors::ModelError> {
    validate_text(text)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        posting_id: Set(posting_id),
        user_id: Set(user_id),
        text: Set(text.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_text_bounds() {
        assert!(validate_text(" ").is_err());
        assert!(validate_text("same here").is_ok());
        assert!(validate_text(&"x".repeat(COMMENT_MAX_CHARS + 1)).is_err());
    }
}
