use crate::{posting, posting_comment, posting_count, posting_sympathy, user};
use crate::tests::setup_test_db;
use sea_orm::{EntityTrait, QueryFilter, ColumnTrait};
use anyhow::Result;
use uuid::Uuid;

/// Test user create and lookup by email
#[tokio::test]
async fn test_user_crud() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()) };

    let email = format!("crud_{}@example.com", Uuid::new_v4());
    let created = user::create(&db, &email, "Crud User", user::UserRole::User).await?;
    assert_eq!(created.role, user::UserRole::User);

    let found = user::find_by_email(&db, &email).await?;
    assert_eq!(found.map(|u| u.id), Some(created.id));

    user::hard_delete(&db, created.id).await?;
    assert!(user::Entity::find_by_id(created.id).one(&db).await?.is_none());
    Ok(())
}

/// Posting create defaults, then cascading delete of its children
#[tokio::test]
async fn test_posting_with_children() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()) };

    let u = user::create(&db, &format!("p_{}@example.com", Uuid::new_v4()), "Poster", user::UserRole::User).await?;
    let p = posting::create(&db, u.id, Some("  Cold showers "), "Dorm B has no hot water", Some(posting::PostingTag::Dormitory)).await?;
    assert_eq!(p.status, posting::PostingStatus::Waiting);
    assert_eq!(p.title.as_deref(), Some("Cold showers"));
    assert_eq!(p.sympathy_count, 0);

    let c = posting_comment::create(&db, p.id, u.id, "Same in Dorm C").await?;
    let s = posting_sympathy::create(&db, u.id, p.id, posting_sympathy::SympathyStatus::Yes).await?;

    let found = posting_sympathy::find_by_user_and_posting(&db, u.id, p.id).await?;
    assert_eq!(found.map(|x| x.id), Some(s.id));

    posting::Entity::delete_by_id(p.id).exec(&db).await?;
    assert!(posting_comment::Entity::find_by_id(c.id).one(&db).await?.is_none());
    assert!(posting_sympathy::Entity::find()
        .filter(posting_sympathy::Column::PostingId.eq(p.id))
        .one(&db)
        .await?
        .is_none());

    user::hard_delete(&db, u.id).await?;
    Ok(())
}

/// Seeded quota row exists and can be updated
#[tokio::test]
async fn test_quota_row() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()) };

    let before = posting_count::get_limit(&db).await?;
    assert!(before.is_some());

    let updated = posting_count::set_limit(&db, before.unwrap_or(5)).await?;
    assert_eq!(updated.map(|m| m.id), Some(posting_count::QUOTA_ROW_ID));
    assert!(posting_count::set_limit(&db, -1).await.is_err());
    Ok(())
}
