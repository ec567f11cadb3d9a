pub mod cli;
pub mod controllers;
pub mod date;
pub mod error;
pub mod fetch;
pub mod github;
pub mod models;
pub mod types;

pub use controllers::{DetailController, ListController};
pub use error::{FetchError, GitHubUserError, Result};
pub use fetch::{UserFetcher, DEFAULT_PER_PAGE};
pub use models::{DetailState, ListState};
pub use types::{UserDetail, UserSummary};
