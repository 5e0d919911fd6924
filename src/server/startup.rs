use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;

use crate::server::{
    config::Config,
    data::remote::{github::GitHubStore, RemoteStore},
    error::AppError,
    router,
    service::{
        publisher::PresencePublisher, registry::RegistryStore, whitelist::WhitelistService,
    },
    state::AppState,
};

/// Builds the HTTP client shared by the repository store and mirror polling.
///
/// The GitHub API rejects requests without a `User-Agent`.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;

    Ok(client)
}

/// Connects the remote repository store.
///
/// # Returns
/// - `Some(store)` - Repository credentials are configured
/// - `None` - Remote storage is disabled; only the local files are used
pub fn setup_remote_store(
    config: &Config,
    http: &reqwest::Client,
) -> Option<Arc<dyn RemoteStore>> {
    let Some(github) = &config.github else {
        tracing::warn!("GITHUB_TOKEN or GITHUB_REPO not set, remote storage disabled");
        return None;
    };

    tracing::info!("Using repository {} on branch {}", github.repo, github.branch);
    Some(Arc::new(GitHubStore::new(
        http.clone(),
        github.api_url.clone(),
        github.token.clone(),
        github.repo.clone(),
        github.branch.clone(),
    )))
}

/// Builds the shared state and brings local files in line with the repository.
///
/// Resync and whitelist loading degrade to the local copy when the repository is
/// unreachable; only a failed local write aborts startup.
pub async fn setup_state(config: Config, http: reqwest::Client) -> Result<AppState, AppError> {
    let remote = setup_remote_store(&config, &http);

    let publisher = PresencePublisher::new(
        remote.clone(),
        http,
        config.paths.clone(),
        config.verify.clone(),
    );
    let store = RegistryStore::new(&config.data_file, publisher);
    let whitelist =
        WhitelistService::new(&config.whitelist_file, remote, config.paths.whitelist.clone());

    let corrected = store.resync_on_startup().await?;
    let members = store.snapshot().await.len();
    let packs = whitelist.load().await;
    if packs == 0 {
        tracing::warn!("Pack whitelist is empty, every opened pack will be flagged");
    }
    tracing::info!(
        "Loaded {} registered members ({} statuses corrected) and {} whitelisted packs",
        members,
        corrected,
        packs
    );

    Ok(AppState::new(config, store, whitelist))
}

/// Serves the liveness endpoint until the process exits.
pub async fn serve_liveness(port: u16) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;

    tracing::info!("Liveness endpoint listening on {}", addr);
    axum::serve(listener, router::router()).await?;

    Ok(())
}
