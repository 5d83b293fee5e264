//! Moderation endpoints; mounted behind `require_admin`.

use axum::{Extension, Json, extract::{Path, State}};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use models::posting;
use service::identity::Actor;

use crate::errors::JsonApiError;
use crate::routes::auth::ServerState;

#[derive(Debug, Serialize, Deserialize)]
pub struct QuotaLimit { pub limit: i32 }

#[utoipa::path(post, path = "/admin/postings/{id}/solve", tag = "admin", params(("id" = Uuid, Path, description = "Posting id")), responses((status = 200, description = "Marked SOLVED", body = crate::openapi::PostingDoc), (status = 403, description = "Admin only"), (status = 404, description = "Not Found")))]
pub async fn solve(State(state): State<ServerState>, Extension(actor): Extension<Actor>, Path(id): Path<Uuid>) -> Result<Json<posting::Model>, JsonApiError> {
    let p = state.postings.mark_solved(id).await?;
    info!(admin = %actor.id, posting_id = %id, "posting solved");
    Ok(Json(p))
}

#[utoipa::path(post, path = "/admin/postings/{id}/refuse", tag = "admin", params(("id" = Uuid, Path, description = "Posting id")), responses((status = 200, description = "Marked REFUSED", body = crate::openapi::PostingDoc), (status = 403, description = "Admin only"), (status = 404, description = "Not Found")))]
pub async fn refuse(State(state): State<ServerState>, Extension(actor): Extension<Actor>, Path(id): Path<Uuid>) -> Result<Json<posting::Model>, JsonApiError> {
    let p = state.postings.mark_refused(id).await?;
    info!(admin = %actor.id, posting_id = %id, "posting refused");
    Ok(Json(p))
}

#[utoipa::path(get, path = "/admin/posting-quota", tag = "admin", responses((status = 200, description = "Current per-user limit", body = crate::openapi::QuotaLimitDoc), (status = 404, description = "Quota row missing")))]
pub async fn get_quota(State(state): State<ServerState>) -> Result<Json<QuotaLimit>, JsonApiError> {
    Ok(Json(QuotaLimit { limit: state.postings.get_quota_limit().await? }))
}

#[utoipa::path(put, path = "/admin/posting-quota", tag = "admin", request_body = crate::openapi::QuotaLimitDoc, responses((status = 200, description = "Updated", body = crate::openapi::QuotaLimitDoc), (status = 400, description = "Negative limit")))]
pub async fn set_quota(State(state): State<ServerState>, Json(input): Json<QuotaLimit>) -> Result<Json<QuotaLimit>, JsonApiError> {
    Ok(Json(QuotaLimit { limit: state.postings.set_quota_limit(input.limit).await? }))
}
