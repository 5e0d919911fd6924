use serenity::http::Http;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobSchedulerError};

use crate::server::{service::discord::DiscordService, state::AppState};

/// Every 10 minutes, offset from the ban sweep. Discord allows two renames per
/// channel every 10 minutes.
const SCHEDULE: &str = "0 5/10 * * * *";

/// Renames the status and throughput channels after the registry.
pub fn job(state: AppState, discord_http: Arc<Http>) -> Result<Job, JobSchedulerError> {
    Job::new_async(SCHEDULE, move |_uuid, _lock| {
        let state = state.clone();
        let http = discord_http.clone();

        Box::pin(async move {
            update_channels(&state, &http).await;
        })
    })
}

async fn update_channels(state: &AppState, http: &Http) {
    let channels = &state.config.channels;
    if channels.status.is_none() && channels.throughput.is_none() {
        return;
    }

    let registry = state.store.snapshot().await;
    let discord = DiscordService::new(http);

    let renames = [
        (channels.status, status_channel_name(registry.online_codes().len())),
        (channels.throughput, throughput_channel_name(registry.throughput())),
    ];

    for (channel_id, name) in renames {
        let Some(channel_id) = channel_id else {
            continue;
        };
        if let Err(e) = discord.rename_channel(channel_id, &name).await {
            tracing::error!("Failed to rename channel {} to {}: {}", channel_id, name, e);
        }
    }
}

fn status_channel_name(online: usize) -> String {
    format!("🟢 online-{}", online)
}

fn throughput_channel_name(packs_per_minute: f64) -> String {
    format!("📦 {:.1} packs-min", packs_per_minute)
}
