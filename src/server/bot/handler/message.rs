//! Message handler for heartbeats and the legacy `!sync` command.
//!
//! Heartbeats are webhook posts in the heartbeat channel. Every heartbeat is
//! forwarded verbatim to the transparency channel, attributed to a registered
//! member when possible and policed. A rejected heartbeat auto-bans the member,
//! removes their presence role and raises an alert.

use serenity::all::{ChannelId, Command, Context, Message};

use crate::server::{
    bot::command::{self, sync_presence_role},
    service::{
        discord::DiscordService,
        heartbeat::{HeartbeatOutcome, HeartbeatService},
    },
    state::AppState,
};

const SYNC_COMMAND: &str = "!sync";

/// Handle message creation in a channel
pub async fn handle_message(state: &AppState, ctx: Context, message: Message) {
    if is_sync_request(&message) {
        handle_sync(&ctx, &message).await;
        return;
    }

    if is_heartbeat(
        &message,
        state.config.channels.heartbeat,
        &state.config.policer.signature,
    ) {
        handle_heartbeat(state, &ctx, &message).await;
    }
}

/// Whether a message is a human asking to re-register the command table.
fn is_sync_request(message: &Message) -> bool {
    !message.author.bot && message.webhook_id.is_none() && message.content.trim() == SYNC_COMMAND
}

/// Whether a message is a webhook heartbeat in the heartbeat channel.
fn is_heartbeat(message: &Message, heartbeat_channel: Option<ChannelId>, signature: &str) -> bool {
    heartbeat_channel == Some(message.channel_id)
        && message.webhook_id.is_some()
        && message.content.contains(signature)
}

async fn handle_sync(ctx: &Context, message: &Message) {
    let reply = match Command::set_global_commands(&ctx.http, command::all_commands()).await {
        Ok(commands) => {
            tracing::info!(
                "Re-registered {} slash commands on request of {}",
                commands.len(),
                message.author.name
            );
            "Synced commands globally!"
        }
        Err(e) => {
            tracing::error!("Failed to re-register slash commands: {}", e);
            "❌ Failed to sync commands."
        }
    };

    if let Err(e) = message.channel_id.say(&ctx.http, reply).await {
        tracing::error!("Failed to reply to !sync: {}", e);
    }
}

async fn handle_heartbeat(state: &AppState, ctx: &Context, message: &Message) {
    let discord = DiscordService::new(&ctx.http);
    let whitelist = state.whitelist.snapshot().await;

    let outcome = HeartbeatService::new(&state.store, &state.policer)
        .process(&message.content, &whitelist)
        .await;

    if let Some(channel_id) = state.config.channels.transparency {
        if let Err(e) = discord.send(channel_id, &message.content).await {
            tracing::error!("Failed to forward heartbeat to transparency channel: {}", e);
        }
    }

    match outcome {
        Ok(HeartbeatOutcome::Rejected { member, violation }) => {
            sync_presence_role(ctx, state, message.guild_id, member.into(), false).await;

            if let Some(channel_id) = state.config.channels.alert {
                let alert = format!(
                    "🚨 <@{}> was taken offline for {}.",
                    member, violation
                );
                if let Err(e) = discord.send(channel_id, &alert).await {
                    tracing::error!("Failed to send heartbeat alert: {}", e);
                }
            }
        }
        Ok(HeartbeatOutcome::Accepted { member, sample }) => {
            tracing::debug!("Heartbeat accepted for member {}: {:?}", member, sample);
        }
        Ok(HeartbeatOutcome::Unattributed) => {}
        Err(e) => tracing::error!("Failed to process heartbeat: {}", e),
    }
}
