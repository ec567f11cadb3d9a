use crate::fetch::{UserFetcher, DEFAULT_PER_PAGE};
use crate::models::ListState;
use crate::types::UserSummary;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, error, info, warn};

/// Owns the paginated user list and its loading state machine.
///
/// Every operation returns immediately; the fetch runs on a spawned tokio task
/// and its outcome is published through the state channel. Overlapping calls
/// are not serialized: whichever fetch completes last determines the published
/// state. The one exception is `load_initial`, which aborts a previous
/// `load_initial` that is still running.
///
/// A `load_more` that is in flight while `load_initial` runs still appends its
/// page to the items it started from once it completes, replacing the fresh
/// list. Callers that refresh while paging should expect this.
pub struct ListController {
    fetcher: Arc<dyn UserFetcher>,
    per_page: u32,
    state: Arc<watch::Sender<ListState>>,
    is_loading_more: Arc<AtomicBool>,
    has_more_pages: Arc<AtomicBool>,
    initial_load: Mutex<Option<AbortHandle>>,
}

impl ListController {
    pub fn new(fetcher: Arc<dyn UserFetcher>) -> Self {
        Self::with_page_size(fetcher, DEFAULT_PER_PAGE)
    }

    pub fn with_page_size(fetcher: Arc<dyn UserFetcher>, per_page: u32) -> Self {
        let (state, _) = watch::channel(ListState::Loading);

        Self {
            fetcher,
            per_page,
            state: Arc::new(state),
            is_loading_more: Arc::new(AtomicBool::new(false)),
            has_more_pages: Arc::new(AtomicBool::new(true)),
            initial_load: Mutex::new(None),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ListState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListState> {
        self.state.subscribe()
    }

    pub fn has_more_pages(&self) -> bool {
        self.has_more_pages.load(Ordering::SeqCst)
    }

    /// Whether a `load_more` fetch is currently in flight.
    pub fn is_loading_more(&self) -> bool {
        self.is_loading_more.load(Ordering::SeqCst)
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// (Re)load the first page, replacing whatever is currently shown.
    pub fn load_initial(&self) -> JoinHandle<()> {
        if let Ok(mut previous) = self.initial_load.lock() {
            if let Some(handle) = previous.take() {
                debug!("Aborting superseded initial load");
                handle.abort();
            }
        }

        self.has_more_pages.store(true, Ordering::SeqCst);
        self.state.send_replace(ListState::Loading);

        let fetcher = Arc::clone(&self.fetcher);
        let state = Arc::clone(&self.state);
        let has_more_pages = Arc::clone(&self.has_more_pages);
        let per_page = self.per_page;

        let handle = tokio::spawn(async move {
            match fetcher.fetch_user_page(None, per_page).await {
                Ok(users) => {
                    info!(fetched = users.len(), "Loaded first user page");
                    has_more_pages.store(!users.is_empty(), Ordering::SeqCst);
                    state.send_replace(ListState::Success {
                        items: users,
                        is_loading_more: false,
                    });
                }
                Err(e) => {
                    error!("Initial user page failed: {}", e);
                    state.send_replace(ListState::Error { message: e.message });
                }
            }
        });

        if let Ok(mut current) = self.initial_load.lock() {
            *current = Some(handle.abort_handle());
        }

        handle
    }

    /// Append the page following the last loaded user.
    ///
    /// Returns `None` without fetching when the list is not loaded, a page is
    /// already being fetched, the last page was empty, or there is no cursor.
    /// A failed fetch keeps the current items and is only logged.
    pub fn load_more(&self) -> Option<JoinHandle<()>> {
        let (items, cursor) = {
            let current = self.state.borrow();
            match &*current {
                ListState::Success { items, .. } => (items.clone(), current.cursor()),
                ListState::Loading | ListState::Error { .. } => {
                    debug!("Ignoring load_more: list is not loaded");
                    return None;
                }
            }
        };

        if self.is_loading_more.load(Ordering::SeqCst) {
            debug!("Ignoring load_more: a page is already in flight");
            return None;
        }

        if !self.has_more_pages.load(Ordering::SeqCst) {
            debug!("Ignoring load_more: no more pages");
            return None;
        }

        let Some(cursor) = cursor else {
            debug!("Ignoring load_more: no cursor");
            return None;
        };

        if self.is_loading_more.swap(true, Ordering::SeqCst) {
            return None;
        }

        self.state.send_replace(ListState::Success {
            items: items.clone(),
            is_loading_more: true,
        });

        let fetcher = Arc::clone(&self.fetcher);
        let has_more_pages = Arc::clone(&self.has_more_pages);
        let guard = LoadMoreGuard {
            is_loading_more: Arc::clone(&self.is_loading_more),
            state: Arc::clone(&self.state),
            snapshot: Some(items.clone()),
        };
        let per_page = self.per_page;

        Some(tokio::spawn(async move {
            let items = match fetcher.fetch_user_page(Some(cursor), per_page).await {
                Ok(page) => {
                    info!(since = cursor, fetched = page.len(), "Loaded next user page");
                    has_more_pages.store(!page.is_empty(), Ordering::SeqCst);
                    let mut items = items;
                    items.extend(page);
                    items
                }
                Err(e) => {
                    warn!(since = cursor, "Next user page failed, keeping loaded users: {}", e);
                    items
                }
            };

            guard.finish(items);
        }))
    }
}

/// Releases the `load_more` guard however the page task ends.
///
/// If the task unwinds before finishing, the items it started from are put
/// back, provided the list is still marked as loading more.
struct LoadMoreGuard {
    is_loading_more: Arc<AtomicBool>,
    state: Arc<watch::Sender<ListState>>,
    snapshot: Option<Vec<UserSummary>>,
}

impl LoadMoreGuard {
    fn finish(mut self, items: Vec<UserSummary>) {
        self.snapshot = None;
        self.is_loading_more.store(false, Ordering::SeqCst);
        self.state.send_replace(ListState::Success {
            items,
            is_loading_more: false,
        });
    }
}

impl Drop for LoadMoreGuard {
    fn drop(&mut self) {
        // `finish` already released the guard; a page started since then owns it.
        if let Some(items) = self.snapshot.take() {
            self.is_loading_more.store(false, Ordering::SeqCst);
            warn!("Next user page task ended early, restoring loaded users");
            self.state.send_if_modified(|current| {
                if !current.is_loading_more() {
                    return false;
                }
                *current = ListState::Success {
                    items,
                    is_loading_more: false,
                };
                true
            });
        }
    }
}
