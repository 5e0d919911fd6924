use chrono::Utc;
use serenity::http::Http;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobSchedulerError};

use crate::server::{
    error::AppError,
    service::{discord::DiscordService, moderation::ModerationService},
    state::AppState,
};

/// Every 10 minutes.
const SCHEDULE: &str = "0 */10 * * * *";

/// Lifts expired bans and reopens the check-in channel for those members.
pub fn job(state: AppState, discord_http: Arc<Http>) -> Result<Job, JobSchedulerError> {
    Job::new_async(SCHEDULE, move |_uuid, _lock| {
        let state = state.clone();
        let http = discord_http.clone();

        Box::pin(async move {
            if let Err(e) = sweep_bans(&state, &http).await {
                tracing::error!("Error sweeping expired bans: {}", e);
            }
        })
    })
}

async fn sweep_bans(state: &AppState, http: &Http) -> Result<(), AppError> {
    let lifted = ModerationService::new(&state.store)
        .sweep(Utc::now())
        .await?;

    let Some(channel_id) = state.config.channels.checkin else {
        return Ok(());
    };

    let discord = DiscordService::new(http);
    for member in lifted {
        if let Err(e) = discord.restore_channel(channel_id, member.into()).await {
            tracing::warn!(
                "Failed to restore check-in access for member {}: {}",
                member,
                e
            );
        }
    }

    Ok(())
}
