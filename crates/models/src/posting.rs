use sea_orm::{entity::prelude::*, sea_query::Expr, ConnectionTrait, DatabaseConnection, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, user};

pub const TITLE_MAX_CHARS: usize = 100;
pub const TEXT_MAX_CHARS: usize = 2000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostingStatus {
    #[sea_orm(string_value = "WAITING")]
    Waiting,
    #[sea_orm(string_value = "SOLVED")]
    Solved,
    #[sea_orm(string_value = "REFUSED")]
    Refused,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostingTag {
    #[sea_orm(string_value = "SCHOOL")]
    School,
    #[sea_orm(string_value = "DORMITORY")]
    Dormitory,
    #[sea_orm(string_value = "MEAL")]
    Meal,
    #[sea_orm(string_value = "FACILITY")]
    Facility,
    #[sea_orm(string_value = "ETC")]
    Etc,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "posting")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: Option<String>,
    pub text: String,
    pub tag: Option<PostingTag>,
    pub status: PostingStatus,
    /// Number of sympathies currently in the YES state.
    pub sympathy_count: i32,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Trims the title; blank titles are stored as `None`.
pub fn validate_title(title: Option<&str>) -> Result<Option<String>, errors::ModelError> {
    let Some(t) = title.map(str::trim).filter(|t| !t.is_empty()) else { return Ok(None) };
    if t.chars().count() > TITLE_MAX_CHARS {
        return Err(errors::ModelError::Validation(format!("title longer than {TITLE_MAX_CHARS} characters")));
    }
    Ok(Some(t.to_string()))
}

pub fn validate_text(text: &str) -> Result<(), errors::ModelError> {
    if text.trim().is_empty() {
        return Err(errors::ModelError::Validation("text required".into()));
    }
    if text.chars().count() > TEXT_MAX_CHARS {
        return Err(errors::ModelError::Validation(format!("text longer than {TEXT_MAX_CHARS} characters")));
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    user_id: Uuid,
    title: Option<&str>,
    text: &str,
    tag: Option<PostingTag>,
) -> Result<Model, errors::ModelError> {
    let title = validate_title(title)?;
    validate_text(text)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        title: Set(title),
        text: Set(text.to_string()),
        tag: Set(tag),
        status: Set(PostingStatus::Waiting),
        sympathy_count: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Atomically shifts `sympathy_count` by `delta`, never below zero.
pub async fn adjust_sympathy_count<C: ConnectionTrait>(conn: &C, id: Uuid, delta: i32) -> Result<(), errors::ModelError> {
    if delta == 0 { return Ok(()); }
    let mut update = Entity::update_many()
        .col_expr(Column::SympathyCount, Expr::col(Column::SympathyCount).add(delta))
        .filter(Column::Id.eq(id));
    if delta < 0 {
        update = update.filter(Column::SympathyCount.gte(-delta));
    }
    update.exec(conn).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_title_becomes_none() {
        assert_eq!(validate_title(Some("   ")).unwrap(), None);
        assert_eq!(validate_title(None).unwrap(), None);
        assert_eq!(validate_title(Some(" Broken heater ")).unwrap().as_deref(), Some("Broken heater"));
    }

    #[test]
    fn overlong_title_rejected() {
        let long = "t".repeat(TITLE_MAX_CHARS + 1);
        assert!(validate_title(Some(&long)).is_err());
    }

    #[test]
    fn text_limits_count_characters_not_bytes() {
        let hangul = "가".repeat(TEXT_MAX_CHARS);
        assert!(validate_text(&hangul).is_ok());
        assert!(validate_text("").is_err());
        assert!(validate_text(&"a".repeat(TEXT_MAX_CHARS + 1)).is_err());
    }

    #[test]
    fn status_round_trips_through_serde_names() {
        let s: PostingStatus = serde_json::from_str("\"REFUSED\"").unwrap();
        assert_eq!(s, PostingStatus::Refused);
        let t: PostingTag = serde_json::from_str("\"DORMITORY\"").unwrap();
        assert_eq!(t, PostingTag::Dormitory);
    }
}
