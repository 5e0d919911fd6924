//! Test factory for creating Serenity Message objects.
//!
//! Heartbeats arrive as webhook messages and `!sync` as a plain member message, so
//! the factory takes an optional webhook ID and marks webhook authors as bots the
//! way Discord does.

use serenity::all::Message;

/// Creates a test Serenity Message by deserializing JSON.
///
/// # Arguments
/// - `message_id` - Discord message ID (snowflake)
/// - `channel_id` - Channel the message was posted in
/// - `author_id` - Author user ID (the webhook ID for webhook messages)
/// - `content` - Message text
/// - `webhook_id` - Webhook that posted the message, if any
///
/// # Panics
/// - If the JSON cannot be deserialized into a Message (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// use test_utils::serenity::message::create_test_message;
///
/// let heartbeat = create_test_message(1, 500, 900, "ash\nTime: 30m Packs: 12", Some(900));
/// assert!(heartbeat.webhook_id.is_some());
/// ```
pub fn create_test_message(
    message_id: u64,
    channel_id: u64,
    author_id: u64,
    content: &str,
    webhook_id: Option<u64>,
) -> Message {
    serde_json::from_value(serde_json::json!({
        "id": message_id.to_string(),
        "channel_id": channel_id.to_string(),
        "author": {
            "id": author_id.to_string(),
            "username": if webhook_id.is_some() { "Reroll Heartbeat" } else { "member" },
            "discriminator": "0000",
            "global_name": null,
            "avatar": null,
            "bot": webhook_id.is_some(),
        },
        "content": content,
        "timestamp": "2024-01-01T00:00:00.000000+00:00",
        "edited_timestamp": null,
        "tts": false,
        "mention_everyone": false,
        "mentions": [],
        "mention_roles": [],
        "attachments": [],
        "embeds": [],
        "pinned": false,
        "type": 0,
        "webhook_id": webhook_id.map(|id| id.to_string()),
    }))
    .expect("Failed to create test message - invalid JSON structure")
}
