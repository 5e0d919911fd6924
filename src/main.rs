mod server;

use tracing_subscriber::EnvFilter;

use crate::server::{bot, config::Config, error::AppError, scheduler, startup};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;
    let port = config.port;

    let http_client = startup::setup_reqwest_client()?;
    let state = startup::setup_state(config, http_client).await?;

    tracing::info!("Starting bot");

    // Start liveness endpoint in a separate task
    tokio::spawn(async move {
        if let Err(e) = startup::serve_liveness(port).await {
            tracing::error!("Liveness server error: {}", e);
        }
    });

    // Initialize Discord bot and extract HTTP client
    let (bot_client, discord_http) = bot::start::init_bot(&state.config, state.clone()).await?;

    scheduler::start_scheduler(state, discord_http).await?;

    // Runs until the gateway connection shuts down
    bot::start::start_bot(bot_client).await
}
