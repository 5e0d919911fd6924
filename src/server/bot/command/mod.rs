//! Slash commands.
//!
//! Every command is deferred before any work happens; registry writes mirror to the
//! remote repository under the registry lock and can outlast Discord's
//! three-second acknowledgement window. Successful results replace the deferred
//! reply publicly. Errors delete it and are sent as an ephemeral follow-up.

pub mod admin;
pub mod member;
pub mod options;

use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    CreateInteractionResponseFollowup, EditInteractionResponse, GuildId, Permissions, UserId,
};

use crate::server::{
    error::AppError,
    service::{discord::DiscordService, moderation::MAX_BAN_HOURS},
    state::AppState,
};

/// Command table registered globally on ready and on `!sync`.
pub fn all_commands() -> Vec<CreateCommand> {
    let slot = || {
        CreateCommandOption::new(CommandOptionType::String, "slot", "Which Friend Code slot")
            .add_string_choice("primary", "primary")
            .add_string_choice("secondary", "secondary")
    };
    let admin = |name: &str, description: &str| {
        CreateCommand::new(name)
            .description(description)
            .default_member_permissions(Permissions::ADMINISTRATOR)
    };

    vec![
        CreateCommand::new("rg_add_user")
            .description("Register your reroll instance details")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "friend_code",
                    "Your In-Game Player ID",
                )
                .required(true),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Integer,
                    "instances",
                    "Number of instances (excluding main)",
                )
                .required(true)
                .min_int_value(0),
            )
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "prefix", "Username prefix")
                    .required(true),
            )
            .add_option(CreateCommandOption::new(
                CommandOptionType::String,
                "second_friend_code",
                "Player ID of a second account",
            )),
        CreateCommand::new("rg_change_id")
            .description("Change one of your registered Friend Codes")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::String,
                    "friend_code",
                    "New In-Game Player ID",
                )
                .required(true),
            )
            .add_option(slot()),
        CreateCommand::new("rg_online")
            .description("Set your status to ONLINE and start accepting requests")
            .add_option(slot()),
        CreateCommand::new("rg_offline")
            .description("Set your status to OFFLINE")
            .add_option(slot()),
        CreateCommand::new("rg_remove_user").description("Delete your registration"),
        admin("rg_remove_id", "Remove a Friend Code from whoever holds it").add_option(
            CreateCommandOption::new(CommandOptionType::String, "friend_code", "Friend Code")
                .required(true),
        ),
        admin("rg_tempban", "Ban a member from the queue")
            .add_option(
                CreateCommandOption::new(CommandOptionType::User, "member", "Member to ban")
                    .required(true),
            )
            .add_option(
                CreateCommandOption::new(CommandOptionType::Integer, "hours", "Ban length in hours")
                    .min_int_value(1)
                    .max_int_value(MAX_BAN_HOURS as u64),
            ),
        admin("rg_remove_vip", "Remove a Friend Code from the VIP list").add_option(
            CreateCommandOption::new(CommandOptionType::String, "friend_code", "Friend Code")
                .required(true),
        ),
        admin("rg_whitelist", "Allow or disallow a pack")
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "pack", "Pack name")
                    .required(true),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Boolean,
                    "allowed",
                    "Whether the pack may be opened",
                )
                .required(true),
            ),
        admin("rg_upload_build", "Upload a tool build to the repository").add_option(
            CreateCommandOption::new(CommandOptionType::Attachment, "file", "Build file")
                .required(true),
        ),
    ]
}

/// Defers, runs and answers one slash command.
pub async fn handle_command(ctx: &Context, cmd: &CommandInteraction, state: &AppState) {
    if let Err(e) = cmd.defer(&ctx.http).await {
        tracing::error!("Failed to defer /{}: {}", cmd.data.name, e);
        return;
    }

    let result = match cmd.data.name.as_str() {
        "rg_add_user" => member::add_user(cmd, state).await,
        "rg_change_id" => member::change_id(cmd, state).await,
        "rg_online" => member::online(ctx, cmd, state).await,
        "rg_offline" => member::offline(ctx, cmd, state).await,
        "rg_remove_user" => member::remove_user(ctx, cmd, state).await,
        "rg_remove_id" => admin::remove_id(ctx, cmd, state).await,
        "rg_tempban" => admin::tempban(ctx, cmd, state).await,
        "rg_remove_vip" => admin::remove_vip(cmd, state).await,
        "rg_whitelist" => admin::whitelist(cmd, state).await,
        "rg_upload_build" => admin::upload_build(cmd, state).await,
        name => Err(AppError::InternalError(format!("Unknown command '{}'", name))),
    };

    finish(ctx, cmd, result).await;
}

async fn finish(ctx: &Context, cmd: &CommandInteraction, result: Result<String, AppError>) {
    let sent = match result {
        Ok(content) => cmd
            .edit_response(&ctx.http, EditInteractionResponse::new().content(content))
            .await
            .map(|_| ()),
        Err(err) => {
            if let Err(e) = cmd.delete_response(&ctx.http).await {
                tracing::warn!("Failed to delete deferred reply: {}", e);
            }
            cmd.create_followup(
                &ctx.http,
                CreateInteractionResponseFollowup::new()
                    .content(err.user_message())
                    .ephemeral(true),
            )
            .await
            .map(|_| ())
        }
    };

    if let Err(e) = sent {
        tracing::error!("Failed to answer /{}: {}", cmd.data.name, e);
    }
}

/// Rejects invokers without the administrator permission.
///
/// Backs up `default_member_permissions`, which guild admins can override.
fn require_admin(cmd: &CommandInteraction) -> Result<(), AppError> {
    let is_admin = cmd
        .member
        .as_ref()
        .and_then(|member| member.permissions)
        .is_some_and(|permissions| permissions.administrator());

    if is_admin {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Grants or removes the presence role.
///
/// Failures are logged; the registry change that triggered the sync stands.
pub async fn sync_presence_role(
    ctx: &Context,
    state: &AppState,
    guild_id: Option<GuildId>,
    user_id: UserId,
    online: bool,
) {
    let Some(guild_id) = guild_id else {
        return;
    };

    let discord = DiscordService::new(&ctx.http);
    let role = &state.config.presence_role;
    let result = if online {
        discord.grant_role(guild_id, user_id, role).await
    } else {
        discord.revoke_role(guild_id, user_id, role).await
    };

    if let Err(e) = result {
        tracing::warn!(
            "Failed to {} role {} for {}: {}",
            if online { "grant" } else { "remove" },
            role,
            user_id,
            e
        );
    }
}
