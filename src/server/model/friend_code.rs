use serde::{Deserialize, Serialize};
use std::fmt;

use crate::server::error::registry::RegistryError;

/// A 16-digit in-game friend code.
///
/// Only [`FriendCode::parse`] validates. Deserialization is transparent so that a
/// single hand-edited entry cannot make the whole registry unreadable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FriendCode(String);

impl FriendCode {
    /// Number of digits in a friend code.
    pub const LEN: usize = 16;

    /// Parses a friend code, requiring exactly 16 ASCII digits.
    ///
    /// # Arguments
    /// - `input` - Raw code as typed by the member
    ///
    /// # Returns
    /// - `Ok(FriendCode)` - Input is a well-formed code
    /// - `Err(RegistryError::InvalidCodeFormat)` - Wrong length or non-digit characters
    pub fn parse(input: &str) -> Result<Self, RegistryError> {
        if input.len() == Self::LEN && input.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(input.to_string()))
        } else {
            Err(RegistryError::InvalidCodeFormat {
                len: input.chars().count(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FriendCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
