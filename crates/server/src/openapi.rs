use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(utoipa::ToSchema)]
pub struct RegisterRequest { pub email: String, pub name: String, pub password: String }

#[derive(utoipa::ToSchema)]
pub struct LoginRequest { pub email: String, pub password: String }

#[derive(utoipa::ToSchema)]
pub struct CreatePostingRequest {
    /// At most 100 characters
    pub title: Option<String>,
    /// 1..=2000 characters
    pub text: String,
    /// SCHOOL, DORMITORY, MEAL, FACILITY or ETC
    pub tag: Option<String>,
}

#[derive(utoipa::ToSchema)]
pub struct ModifyPostingRequest { pub title: Option<String>, pub text: String }

#[derive(utoipa::ToSchema)]
pub struct CommentRequest { pub text: String }

#[derive(utoipa::ToSchema)]
pub struct PostingDoc {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: Option<String>,
    pub text: String,
    pub tag: Option<String>,
    /// WAITING, SOLVED or REFUSED
    pub status: String,
    pub sympathy_count: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(utoipa::ToSchema)]
pub struct CommentDoc {
    pub id: Uuid,
    pub posting_id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(utoipa::ToSchema)]
pub struct SympathyDoc {
    pub id: Uuid,
    pub posting_id: Uuid,
    pub user_id: Uuid,
    /// YES or NO
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(utoipa::ToSchema)]
pub struct QuotaStatusDoc { pub limit: i32, pub used: u64, pub remaining: u64, pub window_days: i64 }

#[derive(utoipa::ToSchema)]
pub struct QuotaLimitDoc { pub limit: i32 }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::logout,
        crate::routes::postings::list,
        crate::routes::postings::page,
        crate::routes::postings::by_tag,
        crate::routes::postings::get,
        crate::routes::postings::create,
        crate::routes::postings::modify,
        crate::routes::postings::delete,
        crate::routes::postings::quota,
        crate::routes::postings::sign_sympathy,
        crate::routes::postings::cancel_sympathy,
        crate::routes::postings::toggle_sympathy,
        crate::routes::postings::list_comments,
        crate::routes::postings::create_comment,
        crate::routes::comments::modify,
        crate::routes::comments::delete,
        crate::routes::admin::solve,
        crate::routes::admin::refuse,
        crate::routes::admin::get_quota,
        crate::routes::admin::set_quota,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            CreatePostingRequest,
            ModifyPostingRequest,
            CommentRequest,
            PostingDoc,
            CommentDoc,
            SympathyDoc,
            QuotaStatusDoc,
            QuotaLimitDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "postings"),
        (name = "sympathy"),
        (name = "comments"),
        (name = "admin")
    )
)]
pub struct ApiDoc;
