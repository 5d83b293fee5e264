use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait, Unchanged,
};
use uuid::Uuid;

use models::posting::{self, PostingStatus, PostingTag};
use models::posting_sympathy::{self, SympathyStatus};
use models::{posting_comment, posting_count};

use crate::posting::domain::{sympathy_delta, CreatePostInput, SortMethod};
use crate::posting::errors::PostingError;
use crate::posting::repository::PostingRepository;

pub struct SeaOrmPostingRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmPostingRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl PostingRepository for SeaOrmPostingRepository {
    async fn find_posting(&self, id: Uuid) -> Result<Option<posting::Model>, PostingError> {
        Ok(posting::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn list_by_status(&self, status: PostingStatus, sort: SortMethod) -> Result<Vec<posting::Model>, PostingError> {
        let q = posting::Entity::find().filter(posting::Column::Status.eq(status));
        let q = match sort {
            SortMethod::Recent => q.order_by_desc(posting::Column::CreatedAt),
            SortMethod::Sympathy => q
                .order_by_desc(posting::Column::SympathyCount)
                .order_by_desc(posting::Column::CreatedAt),
        };
        Ok(q.all(&self.db).await?)
    }

    async fn list_page(&self, page_idx: u64, per_page: u64) -> Result<Vec<posting::Model>, PostingError> {
        let paginator = posting::Entity::find()
            .order_by_desc(posting::Column::CreatedAt)
            .paginate(&self.db, per_page);
        Ok(paginator.fetch_page(page_idx).await?)
    }

    async fn list_by_tag(&self, tag: PostingTag) -> Result<Vec<posting::Model>, PostingError> {
        let rows = posting::Entity::find()
            .filter(posting::Column::Tag.eq(tag))
            .order_by_desc(posting::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn count_by_user_between(&self, user_id: Uuid, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<u64, PostingError> {
        let n = posting::Entity::find()
            .filter(posting::Column::UserId.eq(user_id))
            .filter(posting::Column::CreatedAt.between(from, to))
            .count(&self.db)
            .await?;
        Ok(n)
    }

    async fn insert_posting(&self, owner: Uuid, input: &CreatePostInput) -> Result<posting::Model, PostingError> {
        Ok(posting::create(&self.db, owner, input.title.as_deref(), &input.text, input.tag).await?)
    }

    async fn update_posting(&self, p: posting::Model) -> Result<posting::Model, PostingError> {
        let am = posting::ActiveModel {
            id: Unchanged(p.id),
            title: Set(p.title),
            text: Set(p.text),
            tag: Set(p.tag),
            status: Set(p.status),
            updated_at: Set(p.updated_at),
            ..Default::default()
        };
        Ok(am.update(&self.db).await?)
    }

    async fn delete_posting(&self, id: Uuid) -> Result<(), PostingError> {
        let txn = self.db.begin().await?;
        posting_comment::Entity::delete_many()
            .filter(posting_comment::Column::PostingId.eq(id))
            .exec(&txn)
            .await?;
        posting_sympathy::Entity::delete_many()
            .filter(posting_sympathy::Column::PostingId.eq(id))
            .exec(&txn)
            .await?;
        posting::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        Ok(())
    }

    async fn quota_limit(&self) -> Result<Option<i32>, PostingError> {
        Ok(posting_count::get_limit(&self.db).await?)
    }

    async fn set_quota_limit(&self, limit: i32) -> Result<Option<i32>, PostingError> {
        Ok(posting_count::set_limit(&self.db, limit).await?.map(|row| row.count))
    }

    async fn find_sympathy(&self, user_id: Uuid, posting_id: Uuid) -> Result<Option<posting_sympathy::Model>, PostingError> {
        Ok(posting_sympathy::find_by_user_and_posting(&self.db, user_id, posting_id).await?)
    }

    async fn save_sympathy(&self, user_id: Uuid, posting_id: Uuid, status: SympathyStatus) -> Result<posting_sympathy::Model, PostingError> {
        let txn = self.db.begin().await?;
        let existing = posting_sympathy::find_by_user_and_posting(&txn, user_id, posting_id).await?;
        let prev = existing.as_ref().map(|s| s.status);
        let saved = match existing {
            Some(found) => {
                let mut am: posting_sympathy::ActiveModel = found.into();
                am.status = Set(status);
                am.updated_at = Set(Utc::now().into());
                am.update(&txn).await?
            }
            None => posting_sympathy::create(&txn, user_id, posting_id, status).await?,
        };
        posting::adjust_sympathy_count(&txn, posting_id, sympathy_delta(prev, status)).await?;
        txn.commit().await?;
        Ok(saved)
    }

    async fn list_comments(&self, posting_id: Uuid) -> Result<Vec<posting_comment::Model>, PostingError> {
        let rows = posting_comment::Entity::find()
            .filter(posting_comment::Column::PostingId.eq(posting_id))
            .order_by_asc(posting_comment::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    async fn find_comment(&self, id: Uuid) -> Result<Option<posting_comment::Model>, PostingError> {
        Ok(posting_comment::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn insert_comment(&self, posting_id: Uuid, user_id: Uuid, text: &str) -> Result<posting_comment::Model, PostingError> {
        Ok(posting_comment::create(&self.db, posting_id, user_id, text).await?)
    }

    async fn update_comment(&self, c: posting_comment::Model) -> Result<posting_comment::Model, PostingError> {
        let am = posting_comment::ActiveModel {
            id: Unchanged(c.id),
            text: Set(c.text),
            updated_at: Set(c.updated_at),
            ..Default::default()
        };
        Ok(am.update(&self.db).await?)
    }

    async fn delete_comment(&self, id: Uuid) -> Result<(), PostingError> {
        posting_comment::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}
