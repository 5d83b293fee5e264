use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use models::posting::{self, PostingStatus, PostingTag};
use models::posting_comment;
use models::posting_sympathy::{self, SympathyStatus};

use super::domain::{CommentInput, CreatePostInput, ModifyPostInput, PostingConfig, QuotaStatus, SortMethod};
use super::errors::PostingError;
use super::policy;
use super::repository::PostingRepository;
use crate::identity::Actor;
use crate::pagination::Pagination;

/// Posting business service independent of web framework
pub struct PostingService<R: PostingRepository + ?Sized> {
    repo: Arc<R>,
    cfg: PostingConfig,
}

impl<R: PostingRepository + ?Sized> PostingService<R> {
    pub fn new(repo: Arc<R>, cfg: PostingConfig) -> Self { Self { repo, cfg } }

    /// Postings with exactly `status`, ordered by `sort`.
    #[instrument(skip(self))]
    pub async fn list_by_status_and_sort(&self, status: PostingStatus, sort: SortMethod) -> Result<Vec<posting::Model>, PostingError> {
        self.repo.list_by_status(status, sort).await
    }

    /// Status bucket listing with the default (newest first) order.
    pub async fn list_by_status(&self, status: PostingStatus) -> Result<Vec<posting::Model>, PostingError> {
        self.list_by_status_and_sort(status, SortMethod::default()).await
    }

    pub async fn list_waiting(&self) -> Result<Vec<posting::Model>, PostingError> {
        self.list_by_status(PostingStatus::Waiting).await
    }

    pub async fn list_solved(&self) -> Result<Vec<posting::Model>, PostingError> {
        self.list_by_status(PostingStatus::Solved).await
    }

    pub async fn list_refused(&self) -> Result<Vec<posting::Model>, PostingError> {
        self.list_by_status(PostingStatus::Refused).await
    }

    /// One page of all postings, newest first.
    ///
    /// # Examples
    /// ```
    /// use service::posting::{PostingService, domain::{CreatePostInput, PostingConfig}, repository::mock::MockPostingRepository};
    /// use service::{identity::Actor, pagination::Pagination};
    /// use std::sync::Arc;
    /// let svc = PostingService::new(Arc::new(MockPostingRepository::default()), PostingConfig::default());
    /// let me = Actor::user(uuid::Uuid::new_v4());
    /// for i in 0..3 {
    ///     let input = CreatePostInput { title: None, text: format!("post {i}"), tag: None };
    ///     tokio_test::block_on(svc.create(&me, input)).unwrap();
    /// }
    /// let page = tokio_test::block_on(svc.list_page(Pagination { page: 1, per_page: 2 })).unwrap();
    /// assert_eq!(page.len(), 2);
    /// ```
    #[instrument(skip(self))]
    pub async fn list_page(&self, p: Pagination) -> Result<Vec<posting::Model>, PostingError> {
        let (page_idx, per_page) = p.normalize();
        self.repo.list_page(page_idx, per_page).await
    }

    #[instrument(skip(self))]
    pub async fn list_by_tag(&self, tag: PostingTag) -> Result<Vec<posting::Model>, PostingError> {
        self.repo.list_by_tag(tag).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<posting::Model, PostingError> {
        self.repo.find_posting(id).await?.ok_or(PostingError::PostNotFound)
    }

    /// How many postings `actor` may still create inside the current window.
    #[instrument(skip(self, actor), fields(user_id = %actor.id))]
    pub async fn quota_for(&self, actor: &Actor) -> Result<QuotaStatus, PostingError> {
        let limit = self.repo.quota_limit().await?.ok_or(PostingError::QuotaConfigNotFound)?;
        let to = Utc::now();
        let from = Duration::try_days(self.cfg.quota_window_days)
            .and_then(|window| to.checked_sub_signed(window))
            .ok_or_else(|| PostingError::Validation(format!("quota window of {} days is out of range", self.cfg.quota_window_days)))?;
        let used = self.repo.count_by_user_between(actor.id, from, to).await?;
        Ok(QuotaStatus::new(limit, used, self.cfg.quota_window_days))
    }

    /// Create a WAITING posting owned by `actor`, subject to the posting quota.
    ///
    /// # Examples
    /// ```
    /// use service::posting::{PostingService, PostingError, domain::{CreatePostInput, PostingConfig}, repository::mock::MockPostingRepository};
    /// use service::identity::Actor;
    /// use std::sync::Arc;
    /// let svc = PostingService::new(Arc::new(MockPostingRepository::with_quota(Some(1))), PostingConfig::default());
    /// let me = Actor::user(uuid::Uuid::new_v4());
    /// let input = CreatePostInput { title: Some("Heater".into()), text: "Room 204 is cold".into(), tag: None };
    /// let p = tokio_test::block_on(svc.create(&me, input.clone())).unwrap();
    /// assert_eq!(p.user_id, me.id);
    /// let second = tokio_test::block_on(svc.create(&me, input));
    /// assert!(matches!(second, Err(PostingError::QuotaExceeded { .. })));
    /// ```
    #[instrument(skip(self, actor, input), fields(user_id = %actor.id))]
    pub async fn create(&self, actor: &Actor, input: CreatePostInput) -> Result<posting::Model, PostingError> {
        posting::validate_title(input.title.as_deref())?;
        posting::validate_text(&input.text)?;

        let quota = self.quota_for(actor).await?;
        if !policy::quota_allows(quota.used, quota.limit) {
            warn!(used = quota.used, limit = quota.limit, "posting_quota_exceeded");
            return Err(PostingError::QuotaExceeded { used: quota.used, limit: quota.limit });
        }

        let created = self.repo.insert_posting(actor.id, &input).await?;
        info!(posting_id = %created.id, "posting_created");
        Ok(created)
    }

    /// Owner-only edit of title and text; status is left as is.
    #[instrument(skip(self, actor, input), fields(user_id = %actor.id))]
    pub async fn modify(&self, actor: &Actor, id: Uuid, input: ModifyPostInput) -> Result<posting::Model, PostingError> {
        let mut p = self.get(id).await?;
        if !policy::can_modify_posting(actor, &p) {
            return Err(PostingError::Forbidden("only the author may modify a posting"));
        }
        p.title = posting::validate_title(input.title.as_deref())?;
        posting::validate_text(&input.text)?;
        p.text = input.text;
        p.updated_at = Utc::now().into();
        let updated = self.repo.update_posting(p).await?;
        debug!(posting_id = %updated.id, "posting_modified");
        Ok(updated)
    }

    /// Remove a posting with its comments and sympathies; owner or ADMIN.
    #[instrument(skip(self, actor), fields(user_id = %actor.id))]
    pub async fn delete(&self, actor: &Actor, id: Uuid) -> Result<(), PostingError> {
        let p = self.get(id).await?;
        if !policy::can_delete_posting(actor, &p) {
            return Err(PostingError::Forbidden("only the author or an admin may delete a posting"));
        }
        self.repo.delete_posting(id).await?;
        info!(posting_id = %id, "posting_deleted");
        Ok(())
    }

    pub async fn mark_solved(&self, id: Uuid) -> Result<posting::Model, PostingError> {
        self.transition(id, PostingStatus::Solved).await
    }

    pub async fn mark_refused(&self, id: Uuid) -> Result<posting::Model, PostingError> {
        self.transition(id, PostingStatus::Refused).await
    }

    #[instrument(skip(self))]
    async fn transition(&self, id: Uuid, status: PostingStatus) -> Result<posting::Model, PostingError> {
        let mut p = self.get(id).await?;
        p.status = status;
        p.updated_at = Utc::now().into();
        let updated = self.repo.update_posting(p).await?;
        info!(posting_id = %id, status = ?status, "posting_status_changed");
        Ok(updated)
    }

    /// Set the caller's sympathy on a posting to YES, creating the record if needed.
    #[instrument(skip(self, actor), fields(user_id = %actor.id))]
    pub async fn sign_sympathy(&self, actor: &Actor, posting_id: Uuid) -> Result<posting_sympathy::Model, PostingError> {
        self.get(posting_id).await?;
        self.repo.save_sympathy(actor.id, posting_id, SympathyStatus::Yes).await
    }

    /// Set an existing sympathy to NO.
    #[instrument(skip(self, actor), fields(user_id = %actor.id))]
    pub async fn cancel_sympathy(&self, actor: &Actor, posting_id: Uuid) -> Result<posting_sympathy::Model, PostingError> {
        self.get(posting_id).await?;
        if self.repo.find_sympathy(actor.id, posting_id).await?.is_none() {
            return Err(PostingError::SympathyNotFound);
        }
        self.repo.save_sympathy(actor.id, posting_id, SympathyStatus::No).await
    }

    /// Flip the caller's sympathy; a first toggle signs.
    ///
    /// # Examples
    /// ```
    /// use service::posting::{PostingService, domain::{CreatePostInput, PostingConfig}, repository::mock::MockPostingRepository};
    /// use service::identity::Actor;
    /// use models::posting_sympathy::SympathyStatus;
    /// use std::sync::Arc;
    /// let svc = PostingService::new(Arc::new(MockPostingRepository::default()), PostingConfig::default());
    /// let me = Actor::user(uuid::Uuid::new_v4());
    /// let p = tokio_test::block_on(svc.create(&me, CreatePostInput { title: None, text: "Longer gym hours".into(), tag: None })).unwrap();
    /// let first = tokio_test::block_on(svc.toggle_sympathy(&me, p.id)).unwrap();
    /// let second = tokio_test::block_on(svc.toggle_sympathy(&me, p.id)).unwrap();
    /// assert_eq!(first.id, second.id);
    /// assert_eq!(second.status, SympathyStatus::No);
    /// ```
    #[instrument(skip(self, actor), fields(user_id = %actor.id))]
    pub async fn toggle_sympathy(&self, actor: &Actor, posting_id: Uuid) -> Result<posting_sympathy::Model, PostingError> {
        self.get(posting_id).await?;
        let next = match self.repo.find_sympathy(actor.id, posting_id).await? {
            Some(existing) => existing.status.flipped(),
            None => SympathyStatus::Yes,
        };
        self.repo.save_sympathy(actor.id, posting_id, next).await
    }

    /// Comments on an existing posting, oldest first.
    #[instrument(skip(self))]
    pub async fn list_comments(&self, posting_id: Uuid) -> Result<Vec<posting_comment::Model>, PostingError> {
        self.get(posting_id).await?;
        self.repo.list_comments(posting_id).await
    }

    #[instrument(skip(self, actor, input), fields(user_id = %actor.id))]
    pub async fn create_comment(&self, actor: &Actor, posting_id: Uuid, input: CommentInput) -> Result<posting_comment::Model, PostingError> {
        posting_comment::validate_text(&input.text)?;
        self.get(posting_id).await?;
        self.repo.insert_comment(posting_id, actor.id, &input.text).await
    }

    #[instrument(skip(self, actor, input), fields(user_id = %actor.id))]
    pub async fn modify_comment(&self, actor: &Actor, id: Uuid, input: CommentInput) -> Result<posting_comment::Model, PostingError> {
        let mut c = self.find_comment(id).await?;
        if !policy::can_manage_comment(actor, &c) {
            return Err(PostingError::Forbidden("only the author may modify a comment"));
        }
        posting_comment::validate_text(&input.text)?;
        c.text = input.text;
        c.updated_at = Utc::now().into();
        self.repo.update_comment(c).await
    }

    #[instrument(skip(self, actor), fields(user_id = %actor.id))]
    pub async fn delete_comment(&self, actor: &Actor, id: Uuid) -> Result<(), PostingError> {
        let c = self.find_comment(id).await?;
        if !policy::can_manage_comment(actor, &c) {
            return Err(PostingError::Forbidden("only the author may delete a comment"));
        }
        self.repo.delete_comment(id).await
    }

    async fn find_comment(&self, id: Uuid) -> Result<posting_comment::Model, PostingError> {
        self.repo.find_comment(id).await?.ok_or(PostingError::CommentNotFound)
    }

    pub async fn get_quota_limit(&self) -> Result<i32, PostingError> {
        self.repo.quota_limit().await?.ok_or(PostingError::QuotaConfigNotFound)
    }

    #[instrument(skip(self))]
    pub async fn set_quota_limit(&self, limit: i32) -> Result<i32, PostingError> {
        if limit < 0 {
            return Err(PostingError::Validation("quota must be >= 0".into()));
        }
        let saved = self.repo.set_quota_limit(limit).await?.ok_or(PostingError::QuotaConfigNotFound)?;
        info!(limit = saved, "posting_quota_updated");
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posting::repository::mock::MockPostingRepository;

    fn svc_with(repo: MockPostingRepository) -> (PostingService<MockPostingRepository>, Arc<MockPostingRepository>) {
        let repo = Arc::new(repo);
        (PostingService::new(repo.clone(), PostingConfig::default()), repo)
    }

    fn input(text: &str) -> CreatePostInput {
        CreatePostInput { title: None, text: text.into(), tag: None }
    }

    fn backdated(owner: Uuid, days_ago: i64) -> posting::Model {
        let at = (Utc::now() - Duration::days(days_ago)).into();
        posting::Model {
            id: Uuid::new_v4(),
            user_id: owner,
            title: None,
            text: "old post".into(),
            tag: None,
            status: PostingStatus::Waiting,
            sympathy_count: 0,
            created_at: at,
            updated_at: at,
        }
    }

    #[tokio::test]
    async fn oversized_quota_window_is_an_error() {
        let repo = Arc::new(MockPostingRepository::default());
        let svc = PostingService::new(repo.clone(), PostingConfig { quota_window_days: 1_000_000_000 });
        let me = Actor::user(Uuid::new_v4());
        assert!(matches!(svc.quota_for(&me).await, Err(PostingError::Validation(_))));
        assert!(matches!(svc.create(&me, input("hello")).await, Err(PostingError::Validation(_))));
        assert!(repo.list_page(0, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_respects_quota_boundary() {
        let (svc, _) = svc_with(MockPostingRepository::with_quota(Some(2)));
        let me = Actor::user(Uuid::new_v4());
        svc.create(&me, input("one")).await.unwrap();
        svc.create(&me, input("two")).await.unwrap();
        let err = svc.create(&me, input("three")).await.unwrap_err();
        assert!(matches!(err, PostingError::QuotaExceeded { used: 2, limit: 2 }));

        // other users are counted separately
        let other = Actor::user(Uuid::new_v4());
        assert!(svc.create(&other, input("mine")).await.is_ok());
    }

    #[tokio::test]
    async fn postings_outside_window_do_not_count() {
        let (svc, repo) = svc_with(MockPostingRepository::with_quota(Some(1)));
        let me = Actor::user(Uuid::new_v4());
        repo.seed_posting(backdated(me.id, 31));
        assert!(svc.create(&me, input("fresh")).await.is_ok());

        let quota = svc.quota_for(&me).await.unwrap();
        assert_eq!(quota.used, 1);
        assert_eq!(quota.remaining, 0);
    }

    #[tokio::test]
    async fn missing_quota_row_blocks_creation() {
        let (svc, _) = svc_with(MockPostingRepository::with_quota(None));
        let err = svc.create(&Actor::user(Uuid::new_v4()), input("hello")).await.unwrap_err();
        assert!(matches!(err, PostingError::QuotaConfigNotFound));
        assert!(matches!(svc.set_quota_limit(3).await, Err(PostingError::QuotaConfigNotFound)));
    }

    #[tokio::test]
    async fn zero_quota_rejects_everything() {
        let (svc, _) = svc_with(MockPostingRepository::default());
        svc.set_quota_limit(0).await.unwrap();
        let err = svc.create(&Actor::user(Uuid::new_v4()), input("hello")).await.unwrap_err();
        assert_eq!(err.code(), 2102);
        assert!(matches!(svc.set_quota_limit(-1).await, Err(PostingError::Validation(_))));
    }

    #[tokio::test]
    async fn create_validates_before_counting() {
        let (svc, _) = svc_with(MockPostingRepository::default());
        let me = Actor::user(Uuid::new_v4());
        let err = svc.create(&me, input("   ")).await.unwrap_err();
        assert!(matches!(err, PostingError::Validation(_)));
        let long_title = CreatePostInput { title: Some("x".repeat(101)), text: "ok".into(), tag: None };
        assert!(matches!(svc.create(&me, long_title).await, Err(PostingError::Validation(_))));
    }

    #[tokio::test]
    async fn modify_is_owner_only_and_keeps_status() {
        let (svc, _) = svc_with(MockPostingRepository::default());
        let owner = Actor::user(Uuid::new_v4());
        let p = svc.create(&owner, input("draft")).await.unwrap();
        svc.mark_solved(p.id).await.unwrap();

        let edit = ModifyPostInput { title: Some("Fixed".into()), text: "final".into() };
        let stranger = Actor::user(Uuid::new_v4());
        let err = svc.modify(&stranger, p.id, edit.clone()).await.unwrap_err();
        assert!(matches!(err, PostingError::Forbidden(_)));
        let admin = Actor::admin(Uuid::new_v4());
        assert!(matches!(svc.modify(&admin, p.id, edit.clone()).await, Err(PostingError::Forbidden(_))));

        let updated = svc.modify(&owner, p.id, edit).await.unwrap();
        assert_eq!(updated.text, "final");
        assert_eq!(updated.title.as_deref(), Some("Fixed"));
        assert_eq!(updated.status, PostingStatus::Solved);
        assert!(updated.updated_at >= p.updated_at);
    }

    #[tokio::test]
    async fn delete_allows_owner_or_admin() {
        let (svc, repo) = svc_with(MockPostingRepository::default());
        let owner = Actor::user(Uuid::new_v4());
        let a = svc.create(&owner, input("a")).await.unwrap();
        let b = svc.create(&owner, input("b")).await.unwrap();

        let stranger = Actor::user(Uuid::new_v4());
        assert!(matches!(svc.delete(&stranger, a.id).await, Err(PostingError::Forbidden(_))));

        svc.create_comment(&stranger, a.id, CommentInput { text: "+1".into() }).await.unwrap();
        svc.sign_sympathy(&stranger, a.id).await.unwrap();
        svc.delete(&owner, a.id).await.unwrap();
        assert!(matches!(svc.get(a.id).await, Err(PostingError::PostNotFound)));
        assert_eq!(repo.comment_rows(a.id), 0);
        assert_eq!(repo.sympathy_rows(a.id), 0);

        svc.delete(&Actor::admin(Uuid::new_v4()), b.id).await.unwrap();
        assert!(matches!(svc.delete(&owner, b.id).await, Err(PostingError::PostNotFound)));
    }

    #[tokio::test]
    async fn list_by_status_matches_exactly() {
        let (svc, _) = svc_with(MockPostingRepository::default());
        let me = Actor::user(Uuid::new_v4());
        let a = svc.create(&me, input("a")).await.unwrap();
        let b = svc.create(&me, input("b")).await.unwrap();
        let c = svc.create(&me, input("c")).await.unwrap();
        svc.mark_solved(a.id).await.unwrap();
        svc.mark_refused(b.id).await.unwrap();

        let waiting = svc.list_waiting().await.unwrap();
        assert_eq!(waiting.iter().map(|p| p.id).collect::<Vec<_>>(), vec![c.id]);
        let solved = svc.list_solved().await.unwrap();
        assert!(solved.iter().all(|p| p.status == PostingStatus::Solved));
        assert_eq!(solved.len(), 1);
        assert_eq!(svc.list_refused().await.unwrap()[0].id, b.id);
    }

    #[tokio::test]
    async fn sympathy_sort_breaks_ties_by_recency() {
        let (svc, repo) = svc_with(MockPostingRepository::default());
        let me = Actor::user(Uuid::new_v4());
        let older = backdated(me.id, 3);
        let newer = backdated(me.id, 1);
        let mut liked = backdated(me.id, 5);
        liked.sympathy_count = 4;
        for p in [&older, &newer, &liked] { repo.seed_posting(p.clone()); }

        let sorted = svc.list_by_status_and_sort(PostingStatus::Waiting, SortMethod::Sympathy).await.unwrap();
        assert_eq!(sorted.iter().map(|p| p.id).collect::<Vec<_>>(), vec![liked.id, newer.id, older.id]);
        let recent = svc.list_by_status_and_sort(PostingStatus::Waiting, SortMethod::Recent).await.unwrap();
        assert_eq!(recent.iter().map(|p| p.id).collect::<Vec<_>>(), vec![newer.id, older.id, liked.id]);
    }

    #[tokio::test]
    async fn page_and_tag_listings() {
        let (svc, repo) = svc_with(MockPostingRepository::default());
        let me = Actor::user(Uuid::new_v4());
        for days in 1..=5 {
            let mut p = backdated(me.id, days);
            if days % 2 == 0 { p.tag = Some(PostingTag::Dormitory); }
            repo.seed_posting(p);
        }
        let first = svc.list_page(Pagination { page: 1, per_page: 2 }).await.unwrap();
        let third = svc.list_page(Pagination { page: 3, per_page: 2 }).await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(third.len(), 1);
        assert!(first[0].created_at > first[1].created_at);

        let dorm = svc.list_by_tag(PostingTag::Dormitory).await.unwrap();
        assert_eq!(dorm.len(), 2);
        assert!(svc.list_by_tag(PostingTag::Meal).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn toggle_reuses_single_record() {
        let (svc, repo) = svc_with(MockPostingRepository::default());
        let me = Actor::user(Uuid::new_v4());
        let p = svc.create(&me, input("vote")).await.unwrap();

        let first = svc.toggle_sympathy(&me, p.id).await.unwrap();
        assert_eq!(first.status, SympathyStatus::Yes);
        assert_eq!(svc.get(p.id).await.unwrap().sympathy_count, 1);

        let second = svc.toggle_sympathy(&me, p.id).await.unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(second.status, SympathyStatus::No);
        assert_eq!(repo.sympathy_rows(p.id), 1);
        assert_eq!(svc.get(p.id).await.unwrap().sympathy_count, 0);
    }

    #[tokio::test]
    async fn sign_is_idempotent_and_cancel_needs_record() {
        let (svc, _) = svc_with(MockPostingRepository::default());
        let me = Actor::user(Uuid::new_v4());
        let p = svc.create(&me, input("vote")).await.unwrap();

        let err = svc.cancel_sympathy(&me, p.id).await.unwrap_err();
        assert!(matches!(err, PostingError::SympathyNotFound));

        svc.sign_sympathy(&me, p.id).await.unwrap();
        svc.sign_sympathy(&me, p.id).await.unwrap();
        assert_eq!(svc.get(p.id).await.unwrap().sympathy_count, 1);

        let cancelled = svc.cancel_sympathy(&me, p.id).await.unwrap();
        assert_eq!(cancelled.status, SympathyStatus::No);
        svc.cancel_sympathy(&me, p.id).await.unwrap();
        assert_eq!(svc.get(p.id).await.unwrap().sympathy_count, 0);

        assert!(matches!(svc.sign_sympathy(&me, Uuid::new_v4()).await, Err(PostingError::PostNotFound)));
    }

    #[tokio::test]
    async fn comments_are_author_managed() {
        let (svc, _) = svc_with(MockPostingRepository::default());
        let owner = Actor::user(Uuid::new_v4());
        let p = svc.create(&owner, input("topic")).await.unwrap();
        let author = Actor::user(Uuid::new_v4());
        let c1 = svc.create_comment(&author, p.id, CommentInput { text: "first".into() }).await.unwrap();
        svc.create_comment(&owner, p.id, CommentInput { text: "second".into() }).await.unwrap();

        let listed = svc.list_comments(p.id).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, c1.id);

        let edit = CommentInput { text: "edited".into() };
        assert!(matches!(svc.modify_comment(&owner, c1.id, edit.clone()).await, Err(PostingError::Forbidden(_))));
        assert!(matches!(svc.delete_comment(&Actor::admin(Uuid::new_v4()), c1.id).await, Err(PostingError::Forbidden(_))));
        assert_eq!(svc.modify_comment(&author, c1.id, edit).await.unwrap().text, "edited");

        svc.delete_comment(&author, c1.id).await.unwrap();
        assert!(matches!(svc.delete_comment(&author, c1.id).await, Err(PostingError::CommentNotFound)));
        assert!(matches!(svc.list_comments(Uuid::new_v4()).await, Err(PostingError::PostNotFound)));
        let orphan = svc.create_comment(&author, Uuid::new_v4(), CommentInput { text: "hi".into() }).await;
        assert!(matches!(orphan, Err(PostingError::PostNotFound)));
    }
}
