//! Status replies returned by the hub for a single device.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Reply to a status query.
///
/// Only the level (`cmd2` on the wire) is interpreted; every other field
/// the hub sends is kept in `extra` untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceStatus {
    #[serde(rename = "cmd2", default, skip_serializing_if = "Option::is_none")]
    pub level_hex: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DeviceStatus {
    /// Reply carrying the given hexadecimal level.
    #[must_use]
    pub fn with_level(level_hex: impl Into<String>) -> Self {
        Self {
            level_hex: Some(level_hex.into()),
            extra: serde_json::Map::new(),
        }
    }

    /// Whether the device reports itself as on, that is whether the level
    /// is a positive hexadecimal integer. `None` when the reply has no
    /// level field.
    ///
    /// Levels of any width are accepted, with an optional sign and `0x`
    /// prefix and `_` between digits.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidLevel`] if the level is present
    /// but not a hexadecimal integer.
    pub fn is_on(&self) -> Result<Option<bool>, ValidationError> {
        self.level_hex.as_deref().map(is_positive_level).transpose()
    }
}

fn is_positive_level(raw: &str) -> Result<bool, ValidationError> {
    let invalid = || ValidationError::InvalidLevel(raw.to_string());

    let trimmed = raw.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(rest) => rest.strip_prefix('_').unwrap_or(rest),
        None => unsigned,
    };

    let well_formed = digits
        .split('_')
        .all(|group| !group.is_empty() && group.chars().all(|c| c.is_ascii_hexdigit()));
    if !well_formed {
        return Err(invalid());
    }
    Ok(!negative && digits.chars().any(|c| c != '0' && c != '_'))
}
