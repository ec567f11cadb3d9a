#![allow(dead_code)]

use async_trait::async_trait;
use github_user_browser::{FetchError, UserDetail, UserFetcher, UserSummary};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::oneshot;

type PageResult = Result<Vec<UserSummary>, FetchError>;
type DetailResult = Result<UserDetail, FetchError>;

enum Step<T> {
    Ready(T),
    Wait(oneshot::Receiver<T>),
    Panic,
}

/// In-memory fetcher that replays scripted responses and records every call.
#[derive(Default)]
pub struct ScriptedFetcher {
    pages: Mutex<VecDeque<Step<PageResult>>>,
    details: Mutex<HashMap<String, VecDeque<Step<DetailResult>>>>,
    page_calls: Mutex<Vec<(Option<u64>, u32)>>,
    detail_calls: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_page(&self, ids: &[u64]) {
        self.pages.lock().unwrap().push_back(Step::Ready(Ok(users(ids))));
    }

    pub fn push_page_error(&self, message: &str) {
        self.pages
            .lock()
            .unwrap()
            .push_back(Step::Ready(Err(FetchError::new(message))));
    }

    /// Queue a page whose response is held back until the returned sender fires.
    pub fn push_gated_page(&self) -> oneshot::Sender<PageResult> {
        let (tx, rx) = oneshot::channel();
        self.pages.lock().unwrap().push_back(Step::Wait(rx));
        tx
    }

    /// Queue a page fetch that panics instead of returning.
    pub fn push_page_panic(&self) {
        self.pages.lock().unwrap().push_back(Step::Panic);
    }

    pub fn push_detail(&self, login: &str, result: DetailResult) {
        self.details
            .lock()
            .unwrap()
            .entry(login.to_string())
            .or_default()
            .push_back(Step::Ready(result));
    }

    pub fn push_gated_detail(&self, login: &str) -> oneshot::Sender<DetailResult> {
        let (tx, rx) = oneshot::channel();
        self.details
            .lock()
            .unwrap()
            .entry(login.to_string())
            .or_default()
            .push_back(Step::Wait(rx));
        tx
    }

    pub fn page_calls(&self) -> Vec<(Option<u64>, u32)> {
        self.page_calls.lock().unwrap().clone()
    }

    pub fn page_cursors(&self) -> Vec<Option<u64>> {
        self.page_calls().into_iter().map(|(since, _)| since).collect()
    }

    pub fn detail_calls(&self) -> Vec<String> {
        self.detail_calls.lock().unwrap().clone()
    }

    /// Yield to spawned tasks until `count` page fetches have started.
    pub async fn wait_for_page_calls(&self, count: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.page_calls.lock().unwrap().len() < count {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("page fetch was never started");
    }

    pub async fn wait_for_detail_calls(&self, count: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.detail_calls.lock().unwrap().len() < count {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("detail fetch was never started");
    }
}

#[async_trait]
impl UserFetcher for ScriptedFetcher {
    async fn fetch_user_page(
        &self,
        since: Option<u64>,
        per_page: u32,
    ) -> Result<Vec<UserSummary>, FetchError> {
        self.page_calls.lock().unwrap().push((since, per_page));
        let step = self.pages.lock().unwrap().pop_front();

        match step {
            Some(Step::Ready(result)) => result,
            Some(Step::Wait(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(FetchError::new("gate dropped"))),
            Some(Step::Panic) => panic!("page fetch blew up"),
            None => Err(FetchError::new("no page scripted")),
        }
    }

    async fn fetch_user_detail(&self, login: &str) -> Result<UserDetail, FetchError> {
        self.detail_calls.lock().unwrap().push(login.to_string());
        let step = self
            .details
            .lock()
            .unwrap()
            .get_mut(login)
            .and_then(|steps| steps.pop_front());

        match step {
            Some(Step::Ready(result)) => result,
            Some(Step::Wait(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(FetchError::new("gate dropped"))),
            Some(Step::Panic) => panic!("detail fetch blew up"),
            None => Err(FetchError::new(format!("Resource not found: {}", login))),
        }
    }
}

pub fn user(id: u64) -> UserSummary {
    UserSummary {
        id,
        login: format!("user{}", id),
        avatar_url: Some(format!("https://avatars.githubusercontent.com/u/{}?v=4", id)),
        user_type: Some("User".to_string()),
    }
}

pub fn users(ids: &[u64]) -> Vec<UserSummary> {
    ids.iter().copied().map(user).collect()
}

pub fn detail(login: &str, id: u64) -> UserDetail {
    UserDetail {
        id,
        login: login.to_string(),
        name: Some(format!("The {}", login)),
        bio: None,
        avatar_url: Some(format!("https://avatars.githubusercontent.com/u/{}?v=4", id)),
        html_url: Some(format!("https://github.com/{}", login)),
        followers: 10,
        following: 2,
        public_repos: 8,
        updated_at: Some("2024-01-01T00:00:00Z".to_string()),
    }
}
