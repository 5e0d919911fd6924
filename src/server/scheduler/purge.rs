use chrono::{Duration, Utc};
use serenity::http::Http;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobSchedulerError};

use crate::server::{service::discord::DiscordService, state::AppState};

/// Hourly, on the hour.
const SCHEDULE: &str = "0 0 * * * *";

/// Deletes old messages from the purge channels.
pub fn job(state: AppState, discord_http: Arc<Http>) -> Result<Job, JobSchedulerError> {
    Job::new_async(SCHEDULE, move |_uuid, _lock| {
        let state = state.clone();
        let http = discord_http.clone();

        Box::pin(async move {
            purge_channels(&state, &http).await;
        })
    })
}

async fn purge_channels(state: &AppState, http: &Http) {
    let Some(cutoff) = Duration::try_hours(state.config.purge_max_age_hours)
        .and_then(|age| Utc::now().checked_sub_signed(age))
    else {
        tracing::error!(
            "Purge age of {} hours is out of range, skipping purge",
            state.config.purge_max_age_hours
        );
        return;
    };
    let discord = DiscordService::new(http);

    for channel_id in &state.config.channels.purge {
        match discord.purge_before(*channel_id, cutoff).await {
            Ok(0) => {}
            Ok(deleted) => tracing::info!("Purged {} old messages from {}", deleted, channel_id),
            Err(e) => tracing::error!("Error purging channel {}: {}", channel_id, e),
        }
    }
}
