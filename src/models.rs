use serde::{Deserialize, Serialize};

use crate::types::{UserDetail, UserSummary};

/// Load state of the paginated user list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ListState {
    Loading,
    Success {
        items: Vec<UserSummary>,
        is_loading_more: bool,
    },
    Error {
        message: Option<String>,
    },
}

impl ListState {
    /// Id of the last loaded user, used as `since` for the next page.
    pub fn cursor(&self) -> Option<u64> {
        match self {
            ListState::Success { items, .. } => items.last().map(|user| user.id),
            ListState::Loading | ListState::Error { .. } => None,
        }
    }

    pub fn items(&self) -> &[UserSummary] {
        match self {
            ListState::Success { items, .. } => items,
            ListState::Loading | ListState::Error { .. } => &[],
        }
    }

    pub fn is_loading_more(&self) -> bool {
        match self {
            ListState::Success { is_loading_more, .. } => *is_loading_more,
            ListState::Loading | ListState::Error { .. } => false,
        }
    }
}

/// Load state of a single user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DetailState {
    Loading,
    Success { detail: UserDetail },
    Error { message: Option<String> },
}

/// Rate limit state reported by the last GitHub response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitState {
    pub remaining: u32,
    pub limit: u32,
    pub reset_time: chrono::DateTime<chrono::Utc>,
    pub is_limited: bool,
}

impl Default for RateLimitState {
    fn default() -> Self {
        Self {
            remaining: 60,
            limit: 60,
            reset_time: chrono::Utc::now() + chrono::Duration::hours(1),
            is_limited: false,
        }
    }
}
