//! Page/limit handling for posting listings.

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

pub const DEFAULT_PER_PAGE: u32 = 20;
pub const MAX_PER_PAGE: u32 = 100;

impl Pagination {
    /// Missing query values fall back to page 1 / 20 per page.
    pub fn from_query(page: Option<u32>, limit: Option<u32>) -> Self {
        Self { page: page.unwrap_or(1), per_page: limit.unwrap_or(DEFAULT_PER_PAGE) }
    }

    /// 0-based page index and a per-page count clamped to `1..=MAX_PER_PAGE`
    pub fn normalize(self) -> (u64, u64) {
        let page = self.page.max(1);
        let per_page = self.per_page.clamp(1, MAX_PER_PAGE);
        (u64::from(page - 1), u64::from(per_page))
    }
}

impl Default for Pagination {
    fn default() -> Self { Self::from_query(None, None) }
}
