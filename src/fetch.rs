//! The data-fetch seam the controllers consume.

use async_trait::async_trait;

use crate::error::FetchError;
use crate::types::{UserDetail, UserSummary};

/// Page size used when the caller does not pick one.
pub const DEFAULT_PER_PAGE: u32 = 50;

/// Source of GitHub user data.
///
/// Implementations must be safe to call again with the same arguments; the
/// controllers never retry on their own.
#[async_trait]
pub trait UserFetcher: Send + Sync {
    /// Users with an id strictly greater than `since`, in ascending id order.
    async fn fetch_user_page(
        &self,
        since: Option<u64>,
        per_page: u32,
    ) -> Result<Vec<UserSummary>, FetchError>;

    async fn fetch_user_detail(&self, login: &str) -> Result<UserDetail, FetchError>;
}
