use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "github-user-browser")]
#[command(about = "GitHub User Browser - Lists GitHub users page by page and shows user profiles")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// GitHub personal access token (anonymous requests when unset)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub REST API root
    #[arg(long, env = "GITHUB_API_URL", default_value = crate::github::API_BASE_URL)]
    pub api_url: String,

    /// Users requested per page
    #[arg(long, env = "GITHUB_PER_PAGE", default_value_t = crate::fetch::DEFAULT_PER_PAGE)]
    pub per_page: u32,

    /// Number of pages to load, including the first one
    #[arg(long, default_value_t = 1)]
    pub pages: u32,

    /// Show the profile of this user instead of listing users
    #[arg(long, short = 'u')]
    pub user: Option<String>,
}
