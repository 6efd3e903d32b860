//! Hub-assigned device addresses.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Stable identifier the hub assigns to a linked device (e.g. `1A2B3C`).
///
/// Kept verbatim, whitespace included, so that it round-trips through the
/// persisted configuration file unchanged. Only blank ids are rejected.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HubDeviceId(String);

impl HubDeviceId {
    /// Build an id from the hub's textual representation.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyDeviceId`] if `raw` is blank.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ValidationError::EmptyDeviceId);
        }
        Ok(Self(raw))
    }

    /// Borrow the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HubDeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for HubDeviceId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for HubDeviceId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HubDeviceId> for String {
    fn from(id: HubDeviceId) -> Self {
        id.0
    }
}

impl Borrow<str> for HubDeviceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for HubDeviceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
