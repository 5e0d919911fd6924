use serenity::all::{AttachmentId, CommandDataOption, CommandDataOptionValue, UserId};

use crate::server::error::AppError;

/// Typed access to the options of a slash command invocation.
pub struct CommandOptions<'a> {
    options: &'a [CommandDataOption],
}

impl<'a> CommandOptions<'a> {
    pub fn new(options: &'a [CommandDataOption]) -> Self {
        Self { options }
    }

    fn value(&self, name: &str) -> Option<&'a CommandDataOptionValue> {
        self.options
            .iter()
            .find(|option| option.name == name)
            .map(|option| &option.value)
    }

    pub fn string(&self, name: &str) -> Option<&'a str> {
        match self.value(name)? {
            CommandDataOptionValue::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.value(name)? {
            CommandDataOptionValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        match self.value(name)? {
            CommandDataOptionValue::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    pub fn user(&self, name: &str) -> Option<UserId> {
        match self.value(name)? {
            CommandDataOptionValue::User(id) => Some(*id),
            _ => None,
        }
    }

    pub fn attachment(&self, name: &str) -> Option<AttachmentId> {
        match self.value(name)? {
            CommandDataOptionValue::Attachment(id) => Some(*id),
            _ => None,
        }
    }

    /// A required option; Discord enforces presence, so absence is an internal error.
    pub fn required<T>(
        &self,
        name: &str,
        get: impl Fn(&Self, &str) -> Option<T>,
    ) -> Result<T, AppError> {
        get(self, name)
            .ok_or_else(|| AppError::InternalError(format!("Missing option '{}'", name)))
    }
}
