use anyhow::bail;
use clap::Parser;
use colored::*;
use github_user_browser::cli::Cli;
use github_user_browser::date::format_iso_date;
use github_user_browser::github::GitHubClient;
use github_user_browser::{DetailController, DetailState, ListController, ListState, UserDetail};
use github_user_browser::{UserFetcher, UserSummary};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();

    let fetcher: Arc<dyn UserFetcher> =
        Arc::new(GitHubClient::with_base_url(cli.token.clone(), &cli.api_url)?);

    match cli.user.as_deref() {
        Some(login) => show_user(fetcher, login).await,
        None => list_users(fetcher, cli.per_page, cli.pages).await,
    }
}

async fn list_users(fetcher: Arc<dyn UserFetcher>, per_page: u32, pages: u32) -> anyhow::Result<()> {
    println!("{}", "GitHub Users".bold().green());
    println!("{}\n", "=".repeat(50).dimmed());

    let controller = ListController::with_page_size(fetcher, per_page);
    controller.load_initial().await?;

    let mut printed = match controller.state() {
        ListState::Success { items, .. } => print_users(&items),
        ListState::Error { message } => {
            eprintln!("{} {}", "Failed to load users:".red(), message.unwrap_or_default());
            bail!("initial user page failed");
        }
        ListState::Loading => bail!("initial user page did not complete"),
    };

    for _ in 1..pages {
        let Some(handle) = controller.load_more() else {
            break;
        };
        handle.await?;

        match controller.state() {
            ListState::Success { items, .. } => {
                if items.len() == printed {
                    // Failed pages keep the list untouched; nothing more to show.
                    break;
                }
                printed += print_users(&items[printed..]);
            }
            ListState::Error { message } => {
                eprintln!("{} {}", "Failed to load users:".red(), message.unwrap_or_default());
                bail!("user list entered an error state");
            }
            ListState::Loading => break,
        }
    }

    println!("\n{} {}", "Users shown:".bold(), printed);
    if !controller.has_more_pages() {
        println!("{}", "No more users available".dimmed());
    }

    Ok(())
}

fn print_users(users: &[UserSummary]) -> usize {
    for user in users {
        println!(
            "{:>10}  {:<30} {}",
            format!("#{}", user.id).dimmed(),
            user.login.bold(),
            format!("({})", user.user_type()).cyan()
        );
    }
    users.len()
}

async fn show_user(fetcher: Arc<dyn UserFetcher>, login: &str) -> anyhow::Result<()> {
    let controller = DetailController::new(fetcher);
    controller.load(login).await?;

    match controller.state() {
        DetailState::Success { detail } => {
            print_detail(&detail);
            Ok(())
        }
        DetailState::Error { message } => {
            eprintln!(
                "{} {}",
                format!("Failed to load {}:", login).red(),
                message.unwrap_or_default()
            );
            bail!("user detail failed");
        }
        DetailState::Loading => bail!("user detail did not complete"),
    }
}

fn print_detail(detail: &UserDetail) {
    let dash = || "-".to_string();

    println!("{}", detail.login.bold().green());
    println!("{}", "=".repeat(50).dimmed());
    println!("{:<14} {}", "Name:".bold(), detail.name.clone().unwrap_or_else(dash));
    println!("{:<14} {}", "Bio:".bold(), detail.bio.clone().unwrap_or_else(dash));
    println!("{:<14} {}", "Followers:".bold(), detail.followers);
    println!("{:<14} {}", "Following:".bold(), detail.following);
    println!("{:<14} {}", "Public repos:".bold(), detail.public_repos);
    println!("{:<14} {}", "Profile:".bold(), detail.html_url.clone().unwrap_or_else(dash));
    println!(
        "{:<14} {}",
        "Updated:".bold(),
        detail.updated_at.as_deref().map(format_iso_date).unwrap_or_else(dash)
    );
}
