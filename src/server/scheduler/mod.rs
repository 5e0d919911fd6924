//! Cron jobs.
//!
//! All jobs run on one [`JobScheduler`] and share the bot's HTTP client. A job logs
//! its own failures; one failing pass never stops the schedule.

pub mod ban_sweep;
pub mod purge;
pub mod republish;
pub mod status_channels;

use serenity::http::Http;
use std::sync::Arc;
use tokio_cron_scheduler::JobScheduler;

use crate::server::{error::AppError, state::AppState};

/// Starts every scheduled job.
///
/// # Arguments
/// - `state` - Shared application state
/// - `discord_http` - Discord HTTP client for channel updates
pub async fn start_scheduler(state: AppState, discord_http: Arc<Http>) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    scheduler
        .add(ban_sweep::job(state.clone(), discord_http.clone())?)
        .await?;
    scheduler.add(republish::job(state.clone())?).await?;
    scheduler
        .add(status_channels::job(state.clone(), discord_http.clone())?)
        .await?;
    scheduler.add(purge::job(state, discord_http)?).await?;

    scheduler.start().await?;

    tracing::info!("Scheduler started");

    Ok(())
}
