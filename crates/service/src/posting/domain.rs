use serde::{Deserialize, Serialize};

use models::posting::PostingTag;
use models::posting_sympathy::SympathyStatus;

/// Ordering for status listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortMethod {
    /// Newest first
    #[default]
    Recent,
    /// Most sympathies first, newest first on ties
    Sympathy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostInput {
    #[serde(default)]
    pub title: Option<String>,
    pub text: String,
    #[serde(default)]
    pub tag: Option<PostingTag>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifyPostInput {
    #[serde(default)]
    pub title: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentInput {
    pub text: String,
}

/// Caller's standing against the posting quota
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaStatus {
    pub limit: i32,
    pub used: u64,
    pub remaining: u64,
    pub window_days: i64,
}

impl QuotaStatus {
    pub fn new(limit: i32, used: u64, window_days: i64) -> Self {
        let remaining = u64::try_from(limit).unwrap_or(0).saturating_sub(used);
        Self { limit, used, remaining, window_days }
    }
}

/// Posting service configuration
#[derive(Debug, Clone, Copy)]
pub struct PostingConfig {
    pub quota_window_days: i64,
}

impl Default for PostingConfig {
    fn default() -> Self { Self { quota_window_days: 30 } }
}

impl From<&configs::PostingConfig> for PostingConfig {
    fn from(c: &configs::PostingConfig) -> Self { Self { quota_window_days: c.quota_window_days } }
}

/// How far `sympathy_count` moves when a record goes from `prev` to `next`.
pub fn sympathy_delta(prev: Option<SympathyStatus>, next: SympathyStatus) -> i32 {
    let weight = |s: Option<SympathyStatus>| i32::from(s == Some(SympathyStatus::Yes));
    weight(Some(next)) - weight(prev)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_only_moves_on_real_changes() {
        assert_eq!(sympathy_delta(None, SympathyStatus::Yes), 1);
        assert_eq!(sympathy_delta(None, SympathyStatus::No), 0);
        assert_eq!(sympathy_delta(Some(SympathyStatus::Yes), SympathyStatus::Yes), 0);
        assert_eq!(sympathy_delta(Some(SympathyStatus::Yes), SympathyStatus::No), -1);
        assert_eq!(sympathy_delta(Some(SympathyStatus::No), SympathyStatus::Yes), 1);
    }

    #[test]
    fn quota_remaining_saturates() {
        assert_eq!(QuotaStatus::new(3, 1, 30).remaining, 2);
        assert_eq!(QuotaStatus::new(3, 7, 30).remaining, 0);
        assert_eq!(QuotaStatus::new(-1, 0, 30).remaining, 0);
    }

    #[test]
    fn sort_defaults_to_recent() {
        assert_eq!(SortMethod::default(), SortMethod::Recent);
        let s: SortMethod = serde_json::from_str("\"SYMPATHY\"").unwrap();
        assert_eq!(s, SortMethod::Sympathy);
    }
}
