//! Discord-side effects of registry changes.
//!
//! Presence role handling, check-in channel permission overwrites, private member
//! channels, channel renames, notices and message purges. Each method is a thin wrapper over Serenity's HTTP
//! client; callers log failures and carry on, so a missing permission leaves the
//! member partially set up rather than failing the command.

use chrono::{DateTime, Utc};
use serenity::all::{
    ChannelId, ChannelType, CreateChannel, EditChannel, EditRole, GetMessages, GuildChannel,
    GuildId, Http, MessageId, PermissionOverwrite, PermissionOverwriteType, Permissions, Role,
    RoleId, UserId,
};

use crate::server::error::AppError;

const PURGE_PAGE_SIZE: u8 = 100;

/// Discord's limit on channel name length.
const CHANNEL_NAME_MAX: usize = 100;

/// Finds a role by name, ignoring case.
pub fn find_role_by_name<'r>(
    roles: impl IntoIterator<Item = &'r Role>,
    name: &str,
) -> Option<RoleId> {
    roles
        .into_iter()
        .find(|role| role.name.eq_ignore_ascii_case(name))
        .map(|role| role.id)
}

/// Channel name for a member's private channel.
///
/// Lowercased, with runs of anything but letters, digits, `-` and `_` collapsed into
/// a single `-`. Falls back to `member-<id>` when nothing usable is left.
pub fn member_channel_name(username: &str, user_id: UserId) -> String {
    let mut name = String::with_capacity(username.len());
    for c in username.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() || c == '_' || c == '-' {
            name.push(c);
        } else if !name.is_empty() && !name.ends_with('-') {
            name.push('-');
        }
    }
    let name = name.trim_end_matches('-');

    if name.is_empty() {
        format!("member-{}", user_id)
    } else {
        name.chars().take(CHANNEL_NAME_MAX).collect()
    }
}

/// Overwrites hiding a private channel from everyone but its member.
///
/// The `@everyone` role shares the guild's ID.
pub fn member_channel_overwrites(guild_id: GuildId, user_id: UserId) -> Vec<PermissionOverwrite> {
    vec![
        PermissionOverwrite {
            allow: Permissions::empty(),
            deny: Permissions::VIEW_CHANNEL,
            kind: PermissionOverwriteType::Role(RoleId::new(guild_id.get())),
        },
        PermissionOverwrite {
            allow: Permissions::VIEW_CHANNEL
                | Permissions::SEND_MESSAGES
                | Permissions::READ_MESSAGE_HISTORY,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Member(user_id),
        },
    ]
}

fn find_channel<'c>(
    channels: impl IntoIterator<Item = &'c GuildChannel>,
    kind: ChannelType,
    name: &str,
    parent: Option<ChannelId>,
) -> Option<ChannelId> {
    channels
        .into_iter()
        .find(|channel| {
            channel.kind == kind
                && channel.name.eq_ignore_ascii_case(name)
                && (parent.is_none() || channel.parent_id == parent)
        })
        .map(|channel| channel.id)
}

pub struct DiscordService<'a> {
    http: &'a Http,
}

impl<'a> DiscordService<'a> {
    pub fn new(http: &'a Http) -> Self {
        Self { http }
    }

    /// Looks up a role by name, creating it when missing.
    pub async fn ensure_role(&self, guild_id: GuildId, name: &str) -> Result<RoleId, AppError> {
        let roles = guild_id.roles(self.http).await?;
        if let Some(role_id) = find_role_by_name(roles.values(), name) {
            return Ok(role_id);
        }

        let role = guild_id
            .create_role(self.http, EditRole::new().name(name).mentionable(false))
            .await?;
        tracing::info!("Created role {} in guild {}", name, guild_id);
        Ok(role.id)
    }

    /// Grants the named role, creating it if needed.
    pub async fn grant_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        name: &str,
    ) -> Result<(), AppError> {
        let role_id = self.ensure_role(guild_id, name).await?;
        self.http
            .add_member_role(guild_id, user_id, role_id, Some("Went online"))
            .await?;
        Ok(())
    }

    /// Removes the named role. A role that does not exist is treated as removed.
    pub async fn revoke_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        name: &str,
    ) -> Result<(), AppError> {
        let roles = guild_id.roles(self.http).await?;
        let Some(role_id) = find_role_by_name(roles.values(), name) else {
            return Ok(());
        };

        self.http
            .remove_member_role(guild_id, user_id, role_id, Some("No longer online"))
            .await?;
        Ok(())
    }

    /// Looks up a category channel by name, creating it when missing.
    pub async fn ensure_category(
        &self,
        guild_id: GuildId,
        name: &str,
    ) -> Result<ChannelId, AppError> {
        let channels = guild_id.channels(self.http).await?;
        if let Some(category_id) = find_channel(channels.values(), ChannelType::Category, name, None)
        {
            return Ok(category_id);
        }

        let category = guild_id
            .create_channel(self.http, CreateChannel::new(name).kind(ChannelType::Category))
            .await?;
        tracing::info!("Created category {} in guild {}", name, guild_id);
        Ok(category.id)
    }

    /// Creates a member's private text channel under `category`.
    ///
    /// A member who rejoins keeps their existing channel.
    ///
    /// # Returns
    /// - `Ok((ChannelId, true))` - Channel was created
    /// - `Ok((ChannelId, false))` - Channel already existed
    pub async fn ensure_member_channel(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        username: &str,
        category: &str,
    ) -> Result<(ChannelId, bool), AppError> {
        let category_id = self.ensure_category(guild_id, category).await?;
        let name = member_channel_name(username, user_id);

        let channels = guild_id.channels(self.http).await?;
        if let Some(channel_id) =
            find_channel(channels.values(), ChannelType::Text, &name, Some(category_id))
        {
            return Ok((channel_id, false));
        }

        let channel = guild_id
            .create_channel(
                self.http,
                CreateChannel::new(name)
                    .kind(ChannelType::Text)
                    .category(category_id)
                    .permissions(member_channel_overwrites(guild_id, user_id)),
            )
            .await?;
        Ok((channel.id, true))
    }

    /// Denies a member viewing and posting in a channel.
    pub async fn deny_channel(&self, channel_id: ChannelId, user_id: UserId) -> Result<(), AppError> {
        channel_id
            .create_permission(
                self.http,
                PermissionOverwrite {
                    allow: Permissions::empty(),
                    deny: Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES,
                    kind: PermissionOverwriteType::Member(user_id),
                },
            )
            .await?;
        Ok(())
    }

    /// Deletes a member's permission overwrite on a channel.
    pub async fn restore_channel(
        &self,
        channel_id: ChannelId,
        user_id: UserId,
    ) -> Result<(), AppError> {
        channel_id
            .delete_permission(self.http, PermissionOverwriteType::Member(user_id))
            .await?;
        Ok(())
    }

    pub async fn rename_channel(&self, channel_id: ChannelId, name: &str) -> Result<(), AppError> {
        channel_id
            .edit(self.http, EditChannel::new().name(name))
            .await?;
        Ok(())
    }

    pub async fn send(&self, channel_id: ChannelId, content: &str) -> Result<(), AppError> {
        channel_id.say(self.http, content).await?;
        Ok(())
    }

    /// Deletes every message in a channel posted before `cutoff`.
    ///
    /// Pages backwards from the newest message, so the walk stops early only when the
    /// channel runs out of history.
    ///
    /// # Returns
    /// - Number of messages deleted
    pub async fn purge_before(
        &self,
        channel_id: ChannelId,
        cutoff: DateTime<Utc>,
    ) -> Result<usize, AppError> {
        let mut deleted = 0;
        let mut before: Option<MessageId> = None;

        loop {
            let mut request = GetMessages::new().limit(PURGE_PAGE_SIZE);
            if let Some(id) = before {
                request = request.before(id);
            }

            let page = channel_id.messages(self.http, request).await?;
            let Some(last) = page.last() else {
                break;
            };
            before = Some(last.id);

            for message in page.iter().filter(|m| is_before(m.timestamp.unix_timestamp(), cutoff)) {
                channel_id.delete_message(self.http, message.id).await?;
                deleted += 1;
            }

            if page.len() < usize::from(PURGE_PAGE_SIZE) {
                break;
            }
        }

        Ok(deleted)
    }
}

fn is_before(unix_timestamp: i64, cutoff: DateTime<Utc>) -> bool {
    unix_timestamp < cutoff.timestamp()
}
