use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use service::auth::AuthError;
use service::posting::PostingError;

/// JSON error body: `{"error": <title>, "detail": <message>, "code": <code>}`
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: Option<String>,
    pub code: u16,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    detail: Option<&'a str>,
    code: u16,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: Option<String>) -> Self {
        Self { status, title, detail, code: status.as_u16() }
    }

    pub fn with_code(mut self, code: u16) -> Self {
        self.code = code;
        self
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, code = self.code, detail = ?self.detail, "request failed");
        }
        let body = ErrorBody { error: self.title, detail: self.detail.as_deref(), code: self.code };
        (self.status, Json(body)).into_response()
    }
}

impl From<PostingError> for JsonApiError {
    fn from(e: PostingError) -> Self {
        let code = e.code();
        let (status, title) = match &e {
            PostingError::PostNotFound => (StatusCode::NOT_FOUND, "Posting Not Found"),
            PostingError::CommentNotFound => (StatusCode::NOT_FOUND, "Comment Not Found"),
            PostingError::SympathyNotFound => (StatusCode::NOT_FOUND, "Sympathy Not Found"),
            PostingError::QuotaConfigNotFound => (StatusCode::NOT_FOUND, "Quota Not Configured"),
            PostingError::Forbidden(_) => (StatusCode::FORBIDDEN, "Forbidden"),
            PostingError::QuotaExceeded { .. } => (StatusCode::TOO_MANY_REQUESTS, "Quota Exceeded"),
            PostingError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation Error"),
            PostingError::Repository(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Repository Error"),
        };
        JsonApiError::new(status, title, Some(e.to_string())).with_code(code)
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        let code = e.code();
        let (status, title) = match &e {
            AuthError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation Error"),
            AuthError::Conflict => (StatusCode::CONFLICT, "Conflict"),
            AuthError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            AuthError::TokenError(_) => (StatusCode::UNAUTHORIZED, "Invalid Token"),
            AuthError::HashError(_) | AuthError::Repository(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Auth Failed"),
        };
        JsonApiError::new(status, title, Some(e.to_string())).with_code(code)
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posting_errors_map_to_http_status() {
        let cases = [
            (PostingError::PostNotFound, StatusCode::NOT_FOUND),
            (PostingError::SympathyNotFound, StatusCode::NOT_FOUND),
            (PostingError::Forbidden("nope"), StatusCode::FORBIDDEN),
            (PostingError::QuotaExceeded { used: 5, limit: 5 }, StatusCode::TOO_MANY_REQUESTS),
            (PostingError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (PostingError::Repository("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            let code = err.code();
            let api: JsonApiError = err.into();
            assert_eq!(api.status, status);
            assert_eq!(api.code, code);
        }
    }

    #[test]
    fn mapping_quota_error_does_not_touch_metrics() {
        let before = crate::metrics::QUOTA_REJECTED_TOTAL.get();
        let api: JsonApiError = PostingError::QuotaExceeded { used: 1, limit: 1 }.into();
        assert_eq!(api.status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(crate::metrics::QUOTA_REJECTED_TOTAL.get(), before);
    }

    #[test]
    fn auth_conflict_is_409() {
        let api: JsonApiError = AuthError::Conflict.into();
        assert_eq!(api.status, StatusCode::CONFLICT);
        assert_eq!(api.code, 1002);
    }
}
