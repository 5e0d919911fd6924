//! Member join handler.
//!
//! Every member who joins gets a private text channel under the configured
//! category, visible only to them and to roles that can see every channel.

use serenity::all::{Context, Member};

use crate::server::{service::discord::DiscordService, state::AppState};

/// Creates the private channel of a member who just joined.
///
/// Failures, usually a missing Manage Channels permission, are logged and the
/// join proceeds without a channel.
pub async fn handle_member_join(state: &AppState, ctx: Context, member: Member) {
    if member.user.bot {
        return;
    }

    let result = DiscordService::new(&ctx.http)
        .ensure_member_channel(
            member.guild_id,
            member.user.id,
            &member.user.name,
            &state.config.member_category,
        )
        .await;

    match result {
        Ok((channel_id, true)) => tracing::info!(
            "Created private channel {} for {}",
            channel_id,
            member.user.name
        ),
        Ok((_, false)) => {}
        Err(e) => tracing::error!(
            "Failed to create private channel for {} in category {}: {}",
            member.user.name,
            state.config.member_category,
            e
        ),
    }
}
