use std::{num::NonZeroU64, ops::RangeInclusive, str::FromStr};

use crate::server::error::config::ConfigError;

/// Parses an environment variable value into `T`.
///
/// # Arguments
/// - `name` - Variable name, reported on failure
/// - `value` - Raw value; surrounding whitespace is ignored
///
/// # Returns
/// - `Ok(T)` - Successfully parsed value
/// - `Err(ConfigError::InvalidEnvVar)` - The value does not parse as `T`
pub fn parse_env_value<T: FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse::<T>().map_err(|_| ConfigError::InvalidEnvVar {
        name: name.to_string(),
        value: value.to_string(),
    })
}

/// Parses an environment variable value that must fall within `range`.
///
/// # Returns
/// - `Ok(T)` - Parsed value inside the range
/// - `Err(ConfigError::InvalidEnvVar)` - Unparseable or out of range
pub fn parse_env_in_range<T: FromStr + PartialOrd>(
    name: &str,
    value: &str,
    range: RangeInclusive<T>,
) -> Result<T, ConfigError> {
    let parsed: T = parse_env_value(name, value)?;
    if range.contains(&parsed) {
        Ok(parsed)
    } else {
        Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: value.to_string(),
        })
    }
}

/// Parses a comma-separated list of Discord IDs, skipping empty items.
///
/// # Returns
/// - `Ok(Vec<NonZeroU64>)` - Parsed IDs in input order
/// - `Err(ConfigError::InvalidEnvVar)` - An item is not a valid (non-zero) ID
pub fn parse_id_list(name: &str, value: &str) -> Result<Vec<NonZeroU64>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| parse_env_value(name, item))
        .collect()
}

/// Splits a comma-separated list into trimmed, non-empty, lowercase items.
pub fn parse_word_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_lowercase)
        .collect()
}
