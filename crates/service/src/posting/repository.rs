use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use models::posting::{self, PostingStatus, PostingTag};
use models::posting_comment;
use models::posting_sympathy::{self, SympathyStatus};

use super::domain::{CreatePostInput, SortMethod};
use super::errors::PostingError;

/// Repository abstraction for posting-related persistence.
#[async_trait]
pub trait PostingRepository: Send + Sync {
    async fn find_posting(&self, id: Uuid) -> Result<Option<posting::Model>, PostingError>;
    async fn list_by_status(&self, status: PostingStatus, sort: SortMethod) -> Result<Vec<posting::Model>, PostingError>;
    /// Newest first; `page_idx` is 0-based.
    async fn list_page(&self, page_idx: u64, per_page: u64) -> Result<Vec<posting::Model>, PostingError>;
    async fn list_by_tag(&self, tag: PostingTag) -> Result<Vec<posting::Model>, PostingError>;
    /// Postings owned by `user_id` created within `[from, to]`.
    async fn count_by_user_between(&self, user_id: Uuid, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<u64, PostingError>;
    async fn insert_posting(&self, owner: Uuid, input: &CreatePostInput) -> Result<posting::Model, PostingError>;
    /// Persists title, text, tag, status and `updated_at` of an existing posting.
    async fn update_posting(&self, p: posting::Model) -> Result<posting::Model, PostingError>;
    /// Removes the posting with its comments and sympathies in one unit.
    async fn delete_posting(&self, id: Uuid) -> Result<(), PostingError>;

    async fn quota_limit(&self) -> Result<Option<i32>, PostingError>;
    async fn set_quota_limit(&self, limit: i32) -> Result<Option<i32>, PostingError>;

    async fn find_sympathy(&self, user_id: Uuid, posting_id: Uuid) -> Result<Option<posting_sympathy::Model>, PostingError>;
    /// Creates or reuses the (user, posting) record, sets `status` and moves
    /// the posting's sympathy counter accordingly, atomically.
    async fn save_sympathy(&self, user_id: Uuid, posting_id: Uuid, status: SympathyStatus) -> Result<posting_sympathy::Model, PostingError>;

    /// Oldest first.
    async fn list_comments(&self, posting_id: Uuid) -> Result<Vec<posting_comment::Model>, PostingError>;
    async fn find_comment(&self, id: Uuid) -> Result<Option<posting_comment::Model>, PostingError>;
    async fn insert_comment(&self, posting_id: Uuid, user_id: Uuid, text: &str) -> Result<posting_comment::Model, PostingError>;
    async fn update_comment(&self, c: posting_comment::Model) -> Result<posting_comment::Model, PostingError>;
    async fn delete_comment(&self, id: Uuid) -> Result<(), PostingError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::cmp::Reverse;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use crate::posting::domain::sympathy_delta;

    pub const DEFAULT_QUOTA: i32 = 5;

    pub struct MockPostingRepository {
        postings: Mutex<HashMap<Uuid, posting::Model>>,
        comments: Mutex<HashMap<Uuid, posting_comment::Model>>,
        sympathies: Mutex<HashMap<(Uuid, Uuid), posting_sympathy::Model>>, // key: (user_id, posting_id)
        quota: Mutex<Option<i32>>,
    }

    impl Default for MockPostingRepository {
        fn default() -> Self { Self::with_quota(Some(DEFAULT_QUOTA)) }
    }

    impl MockPostingRepository {
        /// `None` simulates a missing quota row.
        pub fn with_quota(quota: Option<i32>) -> Self {
            Self {
                postings: Mutex::new(HashMap::new()),
                comments: Mutex::new(HashMap::new()),
                sympathies: Mutex::new(HashMap::new()),
                quota: Mutex::new(quota),
            }
        }

        /// Insert a fully specified posting, e.g. one backdated outside the quota window.
        pub fn seed_posting(&self, p: posting::Model) {
            self.postings.lock().unwrap().insert(p.id, p);
        }

        pub fn sympathy_rows(&self, posting_id: Uuid) -> usize {
            self.sympathies.lock().unwrap().values().filter(|s| s.posting_id == posting_id).count()
        }

        pub fn comment_rows(&self, posting_id: Uuid) -> usize {
            self.comments.lock().unwrap().values().filter(|c| c.posting_id == posting_id).count()
        }

        fn newest_first(rows: &mut [posting::Model]) {
            rows.sort_by_key(|p| Reverse(p.created_at));
        }
    }

    #[async_trait]
    impl PostingRepository for MockPostingRepository {
        async fn find_posting(&self, id: Uuid) -> Result<Option<posting::Model>, PostingError> {
            Ok(self.postings.lock().unwrap().get(&id).cloned())
        }

        async fn list_by_status(&self, status: PostingStatus, sort: SortMethod) -> Result<Vec<posting::Model>, PostingError> {
            let mut rows: Vec<_> = self.postings.lock().unwrap().values().filter(|p| p.status == status).cloned().collect();
            match sort {
                SortMethod::Recent => Self::newest_first(&mut rows),
                SortMethod::Sympathy => rows.sort_by_key(|p| (Reverse(p.sympathy_count), Reverse(p.created_at))),
            }
            Ok(rows)
        }

        async fn list_page(&self, page_idx: u64, per_page: u64) -> Result<Vec<posting::Model>, PostingError> {
            let mut rows: Vec<_> = self.postings.lock().unwrap().values().cloned().collect();
            Self::newest_first(&mut rows);
            let skip = usize::try_from(page_idx.saturating_mul(per_page)).unwrap_or(usize::MAX);
            let take = usize::try_from(per_page).unwrap_or(usize::MAX);
            Ok(rows.into_iter().skip(skip).take(take).collect())
        }

        async fn list_by_tag(&self, tag: PostingTag) -> Result<Vec<posting::Model>, PostingError> {
            let mut rows: Vec<_> = self.postings.lock().unwrap().values().filter(|p| p.tag == Some(tag)).cloned().collect();
            Self::newest_first(&mut rows);
            Ok(rows)
        }

        async fn count_by_user_between(&self, user_id: Uuid, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<u64, PostingError> {
            let postings = self.postings.lock().unwrap();
            let n = postings
                .values()
                .filter(|p| p.user_id == user_id && p.created_at >= from && p.created_at <= to)
                .count();
            Ok(n as u64)
        }

        async fn insert_posting(&self, owner: Uuid, input: &CreatePostInput) -> Result<posting::Model, PostingError> {
            let now = Utc::now().into();
            let p = posting::Model {
                id: Uuid::new_v4(),
                user_id: owner,
                title: posting::validate_title(input.title.as_deref())?,
                text: input.text.clone(),
                tag: input.tag,
                status: PostingStatus::Waiting,
                sympathy_count: 0,
                created_at: now,
                updated_at: now,
            };
            self.postings.lock().unwrap().insert(p.id, p.clone());
            Ok(p)
        }

        async fn update_posting(&self, p: posting::Model) -> Result<posting::Model, PostingError> {
            let mut postings = self.postings.lock().unwrap();
            let slot = postings.get_mut(&p.id).ok_or(PostingError::PostNotFound)?;
            slot.title = p.title;
            slot.text = p.text;
            slot.tag = p.tag;
            slot.status = p.status;
            slot.updated_at = p.updated_at;
            Ok(slot.clone())
        }

        async fn delete_posting(&self, id: Uuid) -> Result<(), PostingError> {
            self.comments.lock().unwrap().retain(|_, c| c.posting_id != id);
            self.sympathies.lock().unwrap().retain(|_, s| s.posting_id != id);
            self.postings.lock().unwrap().remove(&id);
            Ok(())
        }

        async fn quota_limit(&self) -> Result<Option<i32>, PostingError> {
            Ok(*self.quota.lock().unwrap())
        }

        async fn set_quota_limit(&self, limit: i32) -> Result<Option<i32>, PostingError> {
            let mut quota = self.quota.lock().unwrap();
            if quota.is_none() { return Ok(None); }
            *quota = Some(limit);
            Ok(*quota)
        }

        async fn find_sympathy(&self, user_id: Uuid, posting_id: Uuid) -> Result<Option<posting_sympathy::Model>, PostingError> {
            Ok(self.sympathies.lock().unwrap().get(&(user_id, posting_id)).cloned())
        }

        async fn save_sympathy(&self, user_id: Uuid, posting_id: Uuid, status: SympathyStatus) -> Result<posting_sympathy::Model, PostingError> {
            let now = Utc::now().into();
            let mut sympathies = self.sympathies.lock().unwrap();
            let prev = sympathies.get(&(user_id, posting_id)).map(|s| s.status);
            let record = sympathies
                .entry((user_id, posting_id))
                .and_modify(|s| { s.status = status; s.updated_at = now; })
                .or_insert_with(|| posting_sympathy::Model { id: Uuid::new_v4(), posting_id, user_id, status, created_at: now, updated_at: now })
                .clone();
            if let Some(p) = self.postings.lock().unwrap().get_mut(&posting_id) {
                p.sympathy_count = (p.sympathy_count + sympathy_delta(prev, status)).max(0);
            }
            Ok(record)
        }

        async fn list_comments(&self, posting_id: Uuid) -> Result<Vec<posting_comment::Model>, PostingError> {
            let mut rows: Vec<_> = self.comments.lock().unwrap().values().filter(|c| c.posting_id == posting_id).cloned().collect();
            rows.sort_by_key(|c| c.created_at);
            Ok(rows)
        }

        async fn find_comment(&self, id: Uuid) -> Result<Option<posting_comment::Model>, PostingError> {
            Ok(self.comments.lock().unwrap().get(&id).cloned())
        }

        async fn insert_comment(&self, posting_id: Uuid, user_id: Uuid, text: &str) -> Result<posting_comment::Model, PostingError> {
            let now = Utc::now().into();
            let c = posting_comment::Model { id: Uuid::new_v4(), posting_id, user_id, text: text.to_string(), created_at: now, updated_at: now };
            self.comments.lock().unwrap().insert(c.id, c.clone());
            Ok(c)
        }

        async fn update_comment(&self, c: posting_comment::Model) -> Result<posting_comment::Model, PostingError> {
            let mut comments = self.comments.lock().unwrap();
            let slot = comments.get_mut(&c.id).ok_or(PostingError::CommentNotFound)?;
            slot.text = c.text;
            slot.updated_at = c.updated_at;
            Ok(slot.clone())
        }

        async fn delete_comment(&self, id: Uuid) -> Result<(), PostingError> {
            self.comments.lock().unwrap().remove(&id);
            Ok(())
        }
    }
}
