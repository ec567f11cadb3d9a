use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitHubUserError {
    #[error("GitHub API error: {0}")]
    ApiError(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Resource not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, GitHubUserError>;

/// Failure reported by a [`UserFetcher`](crate::fetch::UserFetcher).
///
/// Transport and decoding failures are not distinguished; the message is
/// carried through to the published `Error` state untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", .message.as_deref().unwrap_or("unknown fetch error"))]
pub struct FetchError {
    pub message: Option<String>,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    pub fn without_message() -> Self {
        Self { message: None }
    }
}

impl From<GitHubUserError> for FetchError {
    fn from(err: GitHubUserError) -> Self {
        FetchError::new(err.to_string())
    }
}
