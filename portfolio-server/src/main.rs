//! Portfolio Server
//!
//! HTTP API behind the portfolio site: contact relay, GitHub activity,
//! project catalog and terminal commands.

use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use portfolio::{
    VERSION,
    config::ServerConfig,
    contact::ContactService,
    github::{ActivityCache, ActivitySource, GithubClient},
    network::{serve, AppState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let default_level = if cfg!(feature = "debug-tracing") { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = ServerConfig::from_env()?;

    info!("Portfolio Server v{}", VERSION);
    info!("GitHub user: {} (refresh every {:?})", config.github.username, config.github.refresh_interval);

    let contact = ContactService::from_config(&config.relay);

    let activity = ActivityCache::new();
    let source: Arc<dyn ActivitySource> = Arc::new(GithubClient::new(&config.github));
    let poller = activity.spawn_poller(source, config.github.refresh_interval);

    let result = serve(&config, AppState::new(contact, activity)).await;
    poller.abort();
    result?;

    Ok(())
}
