use thiserror::Error;

use models::errors::ModelError;

/// Business errors for posting workflows
#[derive(Debug, Error)]
pub enum PostingError {
    #[error("posting not found")]
    PostNotFound,
    #[error("comment not found")]
    CommentNotFound,
    #[error("sympathy not found")]
    SympathyNotFound,
    #[error("posting quota is not configured")]
    QuotaConfigNotFound,
    #[error("forbidden: {0}")]
    Forbidden(&'static str),
    #[error("posting quota exhausted ({used}/{limit})")]
    QuotaExceeded { used: u64, limit: i32 },
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl PostingError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            PostingError::PostNotFound => 2001,
            PostingError::CommentNotFound => 2002,
            PostingError::SympathyNotFound => 2003,
            PostingError::QuotaConfigNotFound => 2004,
            PostingError::Forbidden(_) => 2101,
            PostingError::QuotaExceeded { .. } => 2102,
            PostingError::Validation(_) => 2201,
            PostingError::Repository(_) => 2300,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            PostingError::PostNotFound
                | PostingError::CommentNotFound
                | PostingError::SympathyNotFound
                | PostingError::QuotaConfigNotFound
        )
    }
}

impl From<ModelError> for PostingError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => PostingError::Validation(msg),
            ModelError::Db(msg) => PostingError::Repository(msg),
        }
    }
}

impl From<sea_orm::DbErr> for PostingError {
    fn from(e: sea_orm::DbErr) -> Self { PostingError::Repository(e.to_string()) }
}
