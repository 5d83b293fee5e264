use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::errors;

/// Primary key of the single quota row seeded by migration.
pub const QUOTA_ROW_ID: i32 = 1;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "posting_count")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    /// Maximum postings per user inside the quota window.
    pub count: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn get_limit(db: &DatabaseConnection) -> Result<Option<i32>, errors::ModelError> {
    let row = Entity::find_by_id(QUOTA_ROW_ID).one(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(row.map(|r| r.count))
}

/// Updates the quota row; returns `None` when the row does not exist.
pub async fn set_limit(db: &DatabaseConnection, count: i32) -> Result<Option<Model>, errors::ModelError> {
    if count < 0 { return Err(errors::ModelError::Validation("quota must be >= 0".into())); }
    let Some(found) = Entity::find_by_id(QUOTA_ROW_ID).one(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))? else {
        return Ok(None);
    };
    let mut am: ActiveModel = found.into();
    am.count = Set(count);
    let updated = am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(Some(updated))
}
