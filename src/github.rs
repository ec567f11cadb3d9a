use crate::error::{FetchError, GitHubUserError, Result};
use crate::fetch::UserFetcher;
use crate::models::RateLimitState;
use crate::types::{UserDetail, UserSummary};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Response};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

pub const API_BASE_URL: &str = "https://api.github.com";
const LOW_RATE_LIMIT_THRESHOLD: u32 = 10;

pub struct GitHubClient {
    client: Client,
    token: Option<String>,
    base_url: Url,
    last_rate_limit: Mutex<Option<RateLimitState>>,
}

impl GitHubClient {
    pub fn new(token: Option<String>) -> Result<Self> {
        Self::with_base_url(token, API_BASE_URL)
    }

    /// Client pointed at another API root, e.g. a GitHub Enterprise host.
    pub fn with_base_url(token: Option<String>, base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("github-user-browser/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;

        // A trailing slash makes `join` append instead of replacing the last segment.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)
            .map_err(|e| GitHubUserError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        Ok(GitHubClient {
            client,
            token: token.filter(|t| !t.is_empty()),
            base_url,
            last_rate_limit: Mutex::new(None),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Rate limit reported by the most recent response, if any was received.
    pub fn last_rate_limit(&self) -> Option<RateLimitState> {
        self.last_rate_limit
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| GitHubUserError::InvalidUrl(format!("{}: {}", path, e)))
    }

    async fn make_request(&self, url: Url) -> Result<Response> {
        debug!(%url, "Sending GitHub request");

        let mut request = self
            .client
            .get(url.clone())
            .header("Accept", "application/vnd.github.v3+json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("token {}", token));
        }

        let response = request.send().await?;
        let rate_limit = Self::rate_limit_state(&response);

        if let Ok(mut last) = self.last_rate_limit.lock() {
            *last = Some(rate_limit.clone());
        }

        match response.status() {
            status if status.is_success() => {
                if rate_limit.remaining < LOW_RATE_LIMIT_THRESHOLD {
                    warn!(
                        remaining = rate_limit.remaining,
                        reset_time = %rate_limit.reset_time,
                        "GitHub rate limit is running low"
                    );
                }
                Ok(response)
            }
            reqwest::StatusCode::NOT_FOUND => {
                Err(GitHubUserError::NotFound(format!("Resource not found: {}", url)))
            }
            reqwest::StatusCode::FORBIDDEN if rate_limit.is_limited => {
                Err(GitHubUserError::RateLimitExceeded(format!(
                    "API rate limit exceeded. Reset at: {}",
                    rate_limit.reset_time
                )))
            }
            status => {
                let error_text = response.text().await.unwrap_or_default();
                Err(GitHubUserError::ApiError(format!(
                    "API request failed with status {}: {}",
                    status, error_text
                )))
            }
        }
    }

    /// Rate limit state carried in a response's `X-RateLimit-*` headers
    pub fn rate_limit_state(response: &Response) -> RateLimitState {
        let headers = response.headers();
        let header_value = |name: &str| headers.get(name).and_then(|h| h.to_str().ok());

        let defaults = RateLimitState::default();

        let remaining = header_value("X-RateLimit-Remaining")
            .and_then(|s| s.parse::<u32>().ok());

        let limit = header_value("X-RateLimit-Limit")
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(defaults.limit);

        let reset_time = header_value("X-RateLimit-Reset")
            .and_then(|s| s.parse::<i64>().ok())
            .and_then(|timestamp| DateTime::<Utc>::from_timestamp(timestamp, 0))
            .unwrap_or(defaults.reset_time);

        RateLimitState {
            remaining: remaining.unwrap_or(limit),
            limit,
            reset_time,
            is_limited: remaining == Some(0),
        }
    }

    /// Fetch one page of users, starting after the user with id `since`
    pub async fn get_users(&self, since: Option<u64>, per_page: u32) -> Result<Vec<UserSummary>> {
        let mut url = self.endpoint("users")?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(since) = since {
                query.append_pair("since", &since.to_string());
            }
            query.append_pair("per_page", &per_page.to_string());
        }

        let response = self.make_request(url).await?;
        let users: Vec<UserSummary> = response.json().await?;

        debug!(?since, per_page, fetched = users.len(), "Fetched user page");
        Ok(users)
    }

    pub async fn get_user_detail(&self, login: &str) -> Result<UserDetail> {
        let mut url = self.endpoint("users")?;
        url.path_segments_mut()
            .map_err(|_| GitHubUserError::InvalidUrl(self.base_url.to_string()))?
            .push(login);

        let response = self.make_request(url).await?;
        let detail: UserDetail = response.json().await?;
        Ok(detail)
    }
}

#[async_trait]
impl UserFetcher for GitHubClient {
    async fn fetch_user_page(
        &self,
        since: Option<u64>,
        per_page: u32,
    ) -> std::result::Result<Vec<UserSummary>, FetchError> {
        Ok(self.get_users(since, per_page).await?)
    }

    async fn fetch_user_detail(&self, login: &str) -> std::result::Result<UserDetail, FetchError> {
        Ok(self.get_user_detail(login).await?)
    }
}
