use chrono::Utc;
use serenity::all::{CommandInteraction, Context};

use crate::server::{
    bot::command::{options::CommandOptions, sync_presence_role},
    error::AppError,
    model::user::{RegisterUserParam, Slot, SlotStatus},
    service::{member::MemberService, publisher::Propagation},
    state::AppState,
};

/// `/rg_add_user`
pub async fn add_user(cmd: &CommandInteraction, state: &AppState) -> Result<String, AppError> {
    let options = CommandOptions::new(&cmd.data.options);
    let param = RegisterUserParam {
        username: cmd.user.name.clone(),
        friend_code: options
            .required("friend_code", CommandOptions::string)?
            .trim()
            .to_string(),
        instances: options.required("instances", CommandOptions::integer)?,
        prefix: options
            .required("prefix", CommandOptions::string)?
            .trim()
            .to_string(),
        secondary_friend_code: options
            .string("second_friend_code")
            .map(|code| code.trim().to_string()),
    };

    let record = MemberService::new(&state.store)
        .register(cmd.user.id.get(), param)
        .await?;

    let mut reply = String::from("✅ **Registered & Saved!**\n");
    if let Some(code) = &record.primary_code {
        reply.push_str(&format!("• Friend Code: `{}`\n", code));
    }
    if let Some(code) = &record.secondary_code {
        reply.push_str(&format!("• Second Friend Code: `{}`\n", code));
    }
    reply.push_str(&format!(
        "• Instances: `{}`\n• Prefix: `{}`\n\nYou are currently **Offline**. Run `/rg_online` to join the queue.",
        record.instances, record.prefix
    ));
    Ok(reply)
}

/// `/rg_change_id`
pub async fn change_id(cmd: &CommandInteraction, state: &AppState) -> Result<String, AppError> {
    let options = CommandOptions::new(&cmd.data.options);
    let code = options.required("friend_code", CommandOptions::string)?.trim();
    let slot = Slot::from_option(options.string("slot"));

    let change = MemberService::new(&state.store)
        .change_code(cmd.user.id.get(), slot, code)
        .await?;

    let mut reply = format!("✅ Your {} Friend Code is now `{}`", slot.label(), code);
    if let Some(previous) = change.previous {
        reply.push_str(&format!(" (was `{}`)", previous));
    }
    reply.push('.');
    if change.online {
        reply.push_str("\nThe global list has been updated.");
    }
    Ok(reply)
}

/// `/rg_online`
///
/// Publishes the slot, then polls the public mirror so the member learns whether
/// other players can already see the code.
pub async fn online(
    ctx: &Context,
    cmd: &CommandInteraction,
    state: &AppState,
) -> Result<String, AppError> {
    let options = CommandOptions::new(&cmd.data.options);
    let slot = Slot::from_option(options.string("slot"));

    let change = MemberService::new(&state.store)
        .set_status(cmd.user.id.get(), slot, SlotStatus::Online, Utc::now())
        .await?;

    sync_presence_role(ctx, state, cmd.guild_id, cmd.user.id, true).await;

    let mut reply = format!(
        "🟢 **Online!** <@{}> is now accepting friend requests on the {} slot.",
        cmd.user.id,
        slot.label()
    );

    if let Some(code) = &change.code {
        match state.store.publisher().verify_propagation(code).await {
            Propagation::Visible { .. } => {
                reply.push_str(&format!("\n`{}` is live on the global list.", code))
            }
            Propagation::NotVisible { .. } => reply.push_str(&format!(
                "\n⚠️ `{}` is not on the global list yet. It may take a few more minutes to show up.",
                code
            )),
            Propagation::Unchecked => {
                reply.push_str("\nYour ID has been added to the global list.")
            }
        }
    }

    Ok(reply)
}

/// `/rg_offline`
pub async fn offline(
    ctx: &Context,
    cmd: &CommandInteraction,
    state: &AppState,
) -> Result<String, AppError> {
    let options = CommandOptions::new(&cmd.data.options);
    let slot = Slot::from_option(options.string("slot"));

    let change = MemberService::new(&state.store)
        .set_status(cmd.user.id.get(), slot, SlotStatus::Offline, Utc::now())
        .await?;

    if !change.any_online {
        sync_presence_role(ctx, state, cmd.guild_id, cmd.user.id, false).await;
    }

    Ok(format!(
        "🔴 **Offline.** <@{}> has stopped accepting requests on the {} slot.\nYour ID has been removed from the global list.",
        cmd.user.id,
        slot.label()
    ))
}

/// `/rg_remove_user`
pub async fn remove_user(
    ctx: &Context,
    cmd: &CommandInteraction,
    state: &AppState,
) -> Result<String, AppError> {
    MemberService::new(&state.store)
        .unregister(cmd.user.id.get())
        .await?;

    sync_presence_role(ctx, state, cmd.guild_id, cmd.user.id, false).await;

    Ok(format!(
        "👋 <@{}> has been unregistered. Run `/rg_add_user` to join again.",
        cmd.user.id
    ))
}
