use crate::fetch::UserFetcher;
use crate::models::DetailState;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Owns the load state of one user's profile.
///
/// Overlapping `load` calls are neither de-duplicated nor cancelled. Each
/// publishes its result when its fetch completes, so an older request that
/// finishes late overwrites the result of a newer one.
pub struct DetailController {
    fetcher: Arc<dyn UserFetcher>,
    state: Arc<watch::Sender<DetailState>>,
}

impl DetailController {
    pub fn new(fetcher: Arc<dyn UserFetcher>) -> Self {
        let (state, _) = watch::channel(DetailState::Loading);

        Self {
            fetcher,
            state: Arc::new(state),
        }
    }

    pub fn state(&self) -> DetailState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailState> {
        self.state.subscribe()
    }

    /// Fetch the profile for `login`. An empty login is passed to the fetcher as is.
    pub fn load(&self, login: &str) -> JoinHandle<()> {
        self.state.send_replace(DetailState::Loading);

        let fetcher = Arc::clone(&self.fetcher);
        let state = Arc::clone(&self.state);
        let login = login.to_string();

        tokio::spawn(async move {
            match fetcher.fetch_user_detail(&login).await {
                Ok(detail) => {
                    info!(login = %login, id = detail.id, "Loaded user detail");
                    state.send_replace(DetailState::Success { detail });
                }
                Err(e) => {
                    error!(login = %login, "User detail failed: {}", e);
                    state.send_replace(DetailState::Error { message: e.message });
                }
            }
        })
    }
}
