use axum::{Extension, Json, extract::{Path, Query, State}, http::StatusCode};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use models::posting::{self, PostingStatus, PostingTag};
use models::{posting_comment, posting_sympathy};
use service::identity::Actor;
use service::pagination::Pagination;
use service::posting::PostingError;
use service::posting::domain::{CommentInput, CreatePostInput, ModifyPostInput, QuotaStatus, SortMethod};

use crate::errors::JsonApiError;
use crate::metrics;
use crate::routes::auth::ServerState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// WAITING (default), SOLVED or REFUSED
    #[param(value_type = Option<String>)]
    pub status: Option<PostingStatus>,
    /// RECENT (default) or SYMPATHY
    #[param(value_type = Option<String>)]
    pub sort: Option<SortMethod>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// 1-based
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[utoipa::path(get, path = "/postings", tag = "postings", params(ListQuery), responses((status = 200, description = "Postings with the given status", body = [crate::openapi::PostingDoc])))]
pub async fn list(State(state): State<ServerState>, Query(q): Query<ListQuery>) -> Result<Json<Vec<posting::Model>>, JsonApiError> {
    let status = q.status.unwrap_or(PostingStatus::Waiting);
    let rows = state.postings.list_by_status_and_sort(status, q.sort.unwrap_or_default()).await?;
    Ok(Json(rows))
}

#[utoipa::path(get, path = "/postings/page", tag = "postings", params(PageQuery), responses((status = 200, description = "One page, newest first", body = [crate::openapi::PostingDoc])))]
pub async fn page(State(state): State<ServerState>, Query(q): Query<PageQuery>) -> Result<Json<Vec<posting::Model>>, JsonApiError> {
    Ok(Json(state.postings.list_page(Pagination::from_query(q.page, q.limit)).await?))
}

#[utoipa::path(get, path = "/postings/tag/{tag}", tag = "postings", params(("tag" = String, Path, description = "SCHOOL, DORMITORY, MEAL, FACILITY or ETC")), responses((status = 200, description = "Postings with the tag", body = [crate::openapi::PostingDoc])))]
pub async fn by_tag(State(state): State<ServerState>, Path(tag): Path<PostingTag>) -> Result<Json<Vec<posting::Model>>, JsonApiError> {
    Ok(Json(state.postings.list_by_tag(tag).await?))
}

#[utoipa::path(get, path = "/postings/{id}", tag = "postings", params(("id" = Uuid, Path, description = "Posting id")), responses((status = 200, description = "Found", body = crate::openapi::PostingDoc), (status = 404, description = "Not Found")))]
pub async fn get(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<posting::Model>, JsonApiError> {
    Ok(Json(state.postings.get(id).await?))
}

#[utoipa::path(post, path = "/postings", tag = "postings", request_body = crate::openapi::CreatePostingRequest, responses((status = 201, description = "Created", body = crate::openapi::PostingDoc), (status = 400, description = "Validation Error"), (status = 429, description = "Quota Exceeded")))]
pub async fn create(State(state): State<ServerState>, Extension(actor): Extension<Actor>, Json(input): Json<CreatePostInput>) -> Result<(StatusCode, Json<posting::Model>), JsonApiError> {
    match state.postings.create(&actor, input).await {
        Ok(created) => {
            metrics::POSTINGS_CREATED_TOTAL.inc();
            Ok((StatusCode::CREATED, Json(created)))
        }
        Err(e) => {
            if matches!(e, PostingError::QuotaExceeded { .. }) {
                metrics::QUOTA_REJECTED_TOTAL.inc();
            }
            Err(e.into())
        }
    }
}

#[utoipa::path(put, path = "/postings/{id}", tag = "postings", params(("id" = Uuid, Path, description = "Posting id")), request_body = crate::openapi::ModifyPostingRequest, responses((status = 200, description = "Updated", body = crate::openapi::PostingDoc), (status = 403, description = "Forbidden"), (status = 404, description = "Not Found")))]
pub async fn modify(State(state): State<ServerState>, Extension(actor): Extension<Actor>, Path(id): Path<Uuid>, Json(input): Json<ModifyPostInput>) -> Result<Json<posting::Model>, JsonApiError> {
    Ok(Json(state.postings.modify(&actor, id, input).await?))
}

#[utoipa::path(delete, path = "/postings/{id}", tag = "postings", params(("id" = Uuid, Path, description = "Posting id")), responses((status = 204, description = "Deleted"), (status = 403, description = "Forbidden"), (status = 404, description = "Not Found")))]
pub async fn delete(State(state): State<ServerState>, Extension(actor): Extension<Actor>, Path(id): Path<Uuid>) -> Result<StatusCode, JsonApiError> {
    state.postings.delete(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(get, path = "/postings/quota", tag = "postings", responses((status = 200, description = "Caller's remaining quota", body = crate::openapi::QuotaStatusDoc)))]
pub async fn quota(State(state): State<ServerState>, Extension(actor): Extension<Actor>) -> Result<Json<QuotaStatus>, JsonApiError> {
    Ok(Json(state.postings.quota_for(&actor).await?))
}

#[utoipa::path(post, path = "/postings/{id}/sympathy", tag = "sympathy", params(("id" = Uuid, Path, description = "Posting id")), responses((status = 200, description = "Signed", body = crate::openapi::SympathyDoc), (status = 404, description = "Not Found")))]
pub async fn sign_sympathy(State(state): State<ServerState>, Extension(actor): Extension<Actor>, Path(id): Path<Uuid>) -> Result<Json<posting_sympathy::Model>, JsonApiError> {
    let s = state.postings.sign_sympathy(&actor, id).await?;
    metrics::SYMPATHY_CHANGES_TOTAL.with_label_values(&["sign"]).inc();
    Ok(Json(s))
}

#[utoipa::path(delete, path = "/postings/{id}/sympathy", tag = "sympathy", params(("id" = Uuid, Path, description = "Posting id")), responses((status = 200, description = "Cancelled", body = crate::openapi::SympathyDoc), (status = 404, description = "No sympathy to cancel")))]
pub async fn cancel_sympathy(State(state): State<ServerState>, Extension(actor): Extension<Actor>, Path(id): Path<Uuid>) -> Result<Json<posting_sympathy::Model>, JsonApiError> {
    let s = state.postings.cancel_sympathy(&actor, id).await?;
    metrics::SYMPATHY_CHANGES_TOTAL.with_label_values(&["cancel"]).inc();
    Ok(Json(s))
}

#[utoipa::path(post, path = "/postings/{id}/sympathy/toggle", tag = "sympathy", params(("id" = Uuid, Path, description = "Posting id")), responses((status = 200, description = "Toggled", body = crate::openapi::SympathyDoc), (status = 404, description = "Not Found")))]
pub async fn toggle_sympathy(State(state): State<ServerState>, Extension(actor): Extension<Actor>, Path(id): Path<Uuid>) -> Result<Json<posting_sympathy::Model>, JsonApiError> {
    let s = state.postings.toggle_sympathy(&actor, id).await?;
    metrics::SYMPATHY_CHANGES_TOTAL.with_label_values(&["toggle"]).inc();
    Ok(Json(s))
}

#[utoipa::path(get, path = "/postings/{id}/comments", tag = "comments", params(("id" = Uuid, Path, description = "Posting id")), responses((status = 200, description = "Comments, oldest first", body = [crate::openapi::CommentDoc]), (status = 404, description = "Not Found")))]
pub async fn list_comments(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<Vec<posting_comment::Model>>, JsonApiError> {
    Ok(Json(state.postings.list_comments(id).await?))
}

#[utoipa::path(post, path = "/postings/{id}/comments", tag = "comments", params(("id" = Uuid, Path, description = "Posting id")), request_body = crate::openapi::CommentRequest, responses((status = 201, description = "Created", body = crate::openapi::CommentDoc), (status = 404, description = "Not Found")))]
pub async fn create_comment(State(state): State<ServerState>, Extension(actor): Extension<Actor>, Path(id): Path<Uuid>, Json(input): Json<CommentInput>) -> Result<(StatusCode, Json<posting_comment::Model>), JsonApiError> {
    let c = state.postings.create_comment(&actor, id, input).await?;
    Ok((StatusCode::CREATED, Json(c)))
}
