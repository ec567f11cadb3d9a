use serde::{Deserialize, Serialize};

const DEFAULT_USER_TYPE: &str = "User";

// GitHub API response structures
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: u64,
    pub login: String,
    pub avatar_url: Option<String>,
    #[serde(rename = "type")]
    pub user_type: Option<String>,
}

impl UserSummary {
    /// Account type, falling back to `"User"` when GitHub omitted it.
    pub fn user_type(&self) -> &str {
        self.user_type.as_deref().unwrap_or(DEFAULT_USER_TYPE)
    }

    /// Whether both summaries describe the same account, ignoring other fields.
    pub fn same_item(&self, other: &UserSummary) -> bool {
        self.id == other.id
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetail {
    pub id: u64,
    pub login: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
    pub followers: u32,
    pub following: u32,
    pub public_repos: u32,
    pub updated_at: Option<String>,
}
