//! FitLife demo binary
//!
//! Smoke-runs the client against a live backend: authenticates (or reuses a
//! stored credential), loads the profile and the feed, and prints a summary.

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use fitlife_client::api::UsersApi;
use fitlife_client::config::Config;
use fitlife_client::state::{AlwaysConfirm, PostsController, ProfileController};
use fitlife_client::HttpGateway;
use token_store::{FileTokenStore, TokenStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(std::io::Error::other)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log.filter.clone()))
        .init();

    let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(&config.api.token_file));
    let gateway = Arc::new(HttpGateway::new(&config.api.base_url, tokens.clone()));
    let users = UsersApi::new(gateway.clone(), tokens.clone());

    let current_user = match (
        std::env::var("FITLIFE_USERNAME"),
        std::env::var("FITLIFE_PASSWORD"),
    ) {
        (Ok(username), Ok(password)) => {
            let user = users.login(&username, &password).await?;
            info!(user_id = user.id, username = %user.username, "logged in");
            Some(user.id)
        }
        _ => {
            if tokens.get().is_none() {
                error!("no stored credential and no FITLIFE_USERNAME/FITLIFE_PASSWORD set");
                return Err("missing credentials".into());
            }
            None
        }
    };

    let confirmer = Arc::new(AlwaysConfirm);
    let mut profile = ProfileController::new(gateway.clone(), tokens.clone(), confirmer.clone());
    profile.load_profile().await?;
    if let Some(p) = profile.profile() {
        info!(
            username = %p.username,
            goal = p.goal.as_deref().unwrap_or("-"),
            progress = profile.progress(),
            own_posts = profile.posts().len(),
            "profile loaded"
        );
    }

    let acting_user = current_user.or_else(|| profile.profile().map(|p| p.user_id));
    let mut feed = PostsController::new(gateway, confirmer, acting_user);
    feed.load_posts().await?;
    info!(posts = feed.posts().len(), "feed loaded");
    for post in feed.posts().iter().take(5) {
        info!(
            post_id = post.id,
            author = %post.user_username,
            comments = post.comments_count,
            "{}",
            post.content.chars().take(60).collect::<String>()
        );
    }

    Ok(())
}
