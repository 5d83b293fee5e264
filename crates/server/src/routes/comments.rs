use axum::{Extension, Json, extract::{Path, State}, http::StatusCode};
use uuid::Uuid;

use models::posting_comment;
use service::identity::Actor;
use service::posting::domain::CommentInput;

use crate::errors::JsonApiError;
use crate::routes::auth::ServerState;

#[utoipa::path(put, path = "/comments/{id}", tag = "comments", params(("id" = Uuid, Path, description = "Comment id")), request_body = crate::openapi::CommentRequest, responses((status = 200, description = "Updated", body = crate::openapi::CommentDoc), (status = 403, description = "Not the author"), (status = 404, description = "Not Found")))]
pub async fn modify(State(state): State<ServerState>, Extension(actor): Extension<Actor>, Path(id): Path<Uuid>, Json(input): Json<CommentInput>) -> Result<Json<posting_comment::Model>, JsonApiError> {
    Ok(Json(state.postings.modify_comment(&actor, id, input).await?))
}

#[utoipa::path(delete, path = "/comments/{id}", tag = "comments", params(("id" = Uuid, Path, description = "Comment id")), responses((status = 204, description = "Deleted"), (status = 403, description = "Not the author"), (status = 404, description = "Not Found")))]
pub async fn delete(State(state): State<ServerState>, Extension(actor): Extension<Actor>, Path(id): Path<Uuid>) -> Result<StatusCode, JsonApiError> {
    state.postings.delete_comment(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
