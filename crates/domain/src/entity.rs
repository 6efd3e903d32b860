//! Switch entity: the on/off state a host sees for one hub device.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::HubDeviceId;

/// UTC timestamp used for `last_refreshed`.
pub type Timestamp = DateTime<Utc>;

/// Prefix shared by every unique id this integration hands out.
pub const UNIQUE_ID_PREFIX: &str = "insteon_local_";

/// Discrete on/off state of a switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityState {
    On,
    #[default]
    Off,
}

impl EntityState {
    #[must_use]
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl From<bool> for EntityState {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

impl std::fmt::Display for EntityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
        }
    }
}

/// Stable unique id for a hub device, e.g. `insteon_local_1A2B3C`.
#[must_use]
pub fn unique_id(device_id: &HubDeviceId) -> String {
    format!("{UNIQUE_ID_PREFIX}{device_id}")
}

/// Domain-prefixed entity id, e.g. `switch.insteon_local_1a2b3c`.
#[must_use]
pub fn entity_id(device_id: &HubDeviceId) -> String {
    format!(
        "switch.{UNIQUE_ID_PREFIX}{}",
        device_id.as_str().to_ascii_lowercase()
    )
}

/// Point-in-time view of a switch, for hosts and logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchSnapshot {
    pub device_id: HubDeviceId,
    pub unique_id: String,
    pub entity_id: String,
    pub name: String,
    pub state: EntityState,
    pub last_refreshed: Option<Timestamp>,
}
