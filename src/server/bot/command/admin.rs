use chrono::Utc;
use serenity::all::{CommandInteraction, Context};

use crate::server::{
    bot::command::{options::CommandOptions, require_admin, sync_presence_role},
    error::AppError,
    service::{
        build::BuildService, discord::DiscordService, member::MemberService,
        moderation::ModerationService, vip::VipService,
    },
    state::AppState,
};

/// `/rg_remove_id`
pub async fn remove_id(
    ctx: &Context,
    cmd: &CommandInteraction,
    state: &AppState,
) -> Result<String, AppError> {
    require_admin(cmd)?;
    let options = CommandOptions::new(&cmd.data.options);
    let code = options.required("friend_code", CommandOptions::string)?.trim();

    let holder = MemberService::new(&state.store).remove_code(code).await?;

    sync_presence_role(ctx, state, cmd.guild_id, holder.into(), false).await;

    Ok(format!(
        "🗑️ Removed Friend Code `{}` from <@{}>. Both of their slots are now offline.",
        code, holder
    ))
}

/// `/rg_tempban`
pub async fn tempban(
    ctx: &Context,
    cmd: &CommandInteraction,
    state: &AppState,
) -> Result<String, AppError> {
    require_admin(cmd)?;
    let options = CommandOptions::new(&cmd.data.options);
    let member = options.required("member", CommandOptions::user)?;
    let hours = options.integer("hours").unwrap_or(state.config.ban_hours);

    let expiry = ModerationService::new(&state.store)
        .tempban(member.get(), hours, Utc::now())
        .await?;

    if let Some(channel_id) = state.config.channels.checkin {
        if let Err(e) = DiscordService::new(&ctx.http)
            .deny_channel(channel_id, member)
            .await
        {
            tracing::warn!("Failed to lock check-in channel for {}: {}", member, e);
        }
    }
    sync_presence_role(ctx, state, cmd.guild_id, member, false).await;

    Ok(format!(
        "⛔ <@{}> is banned from the queue until <t:{}:f>.",
        member,
        expiry.timestamp()
    ))
}

/// `/rg_remove_vip`
pub async fn remove_vip(cmd: &CommandInteraction, state: &AppState) -> Result<String, AppError> {
    require_admin(cmd)?;
    let options = CommandOptions::new(&cmd.data.options);
    let code = options.required("friend_code", CommandOptions::string)?.trim();

    let publisher = state.store.publisher();
    let removed = VipService::new(
        publisher.remote().map(|remote| remote.as_ref()),
        &publisher.paths().vip,
    )
    .remove_vip(code)
    .await?;

    Ok(if removed {
        format!("🗑️ Removed `{}` from the VIP list.", code)
    } else {
        format!("ℹ️ `{}` is not on the VIP list.", code)
    })
}

/// `/rg_whitelist`
pub async fn whitelist(cmd: &CommandInteraction, state: &AppState) -> Result<String, AppError> {
    require_admin(cmd)?;
    let options = CommandOptions::new(&cmd.data.options);
    let pack = options.required("pack", CommandOptions::string)?.trim();
    let allowed = options.required("allowed", CommandOptions::boolean)?;

    let changed = state.whitelist.set_entry(pack, allowed).await?;

    Ok(match (changed, allowed) {
        (true, true) => format!("✅ `{}` is now allowed.", pack),
        (true, false) => format!("🚫 `{}` is no longer allowed.", pack),
        (false, true) => format!("ℹ️ `{}` was already allowed.", pack),
        (false, false) => format!("ℹ️ `{}` was not on the whitelist.", pack),
    })
}

/// `/rg_upload_build`
pub async fn upload_build(
    cmd: &CommandInteraction,
    state: &AppState,
) -> Result<String, AppError> {
    require_admin(cmd)?;
    let options = CommandOptions::new(&cmd.data.options);
    let attachment_id = options.required("file", CommandOptions::attachment)?;
    let attachment = cmd
        .data
        .resolved
        .attachments
        .get(&attachment_id)
        .ok_or_else(|| AppError::InternalError("Attachment was not resolved".to_string()))?;

    let content = attachment.download().await?;

    let publisher = state.store.publisher();
    let path = BuildService::new(
        publisher.remote().map(|remote| remote.as_ref()),
        &publisher.paths().build_dir,
    )
    .upload(&attachment.filename, &content)
    .await?;

    Ok(format!(
        "📦 Uploaded `{}` ({} bytes) to `{}`.",
        attachment.filename,
        content.len(),
        path
    ))
}
