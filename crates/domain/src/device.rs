//! Linked devices: what the hub reports during discovery.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::HubDeviceId;

/// Persisted mapping of hub device id to user-assigned name.
pub type DeviceNames = BTreeMap<HubDeviceId, String>;

/// Category tag the hub attaches to each linked device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DeviceCategory {
    Switch,
    Dimmer,
    Other(String),
}

impl DeviceCategory {
    /// Whether the device should be exposed as an on/off switch.
    #[must_use]
    pub fn is_switch(&self) -> bool {
        matches!(self, Self::Switch)
    }
}

impl From<&str> for DeviceCategory {
    fn from(value: &str) -> Self {
        match value {
            "switch" => Self::Switch,
            "dimmer" => Self::Dimmer,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for DeviceCategory {
    fn from(value: String) -> Self {
        match value.as_str() {
            "switch" => Self::Switch,
            "dimmer" => Self::Dimmer,
            _ => Self::Other(value),
        }
    }
}

impl From<DeviceCategory> for String {
    fn from(value: DeviceCategory) -> Self {
        value.to_string()
    }
}

impl fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Switch => f.write_str("switch"),
            Self::Dimmer => f.write_str("dimmer"),
            Self::Other(other) => f.write_str(other),
        }
    }
}

/// Metadata the hub reports for one linked device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedDevice {
    #[serde(rename = "cat_type")]
    pub category: DeviceCategory,
    pub model_name: String,
    pub sku: String,
}

impl LinkedDevice {
    /// Human-readable model shown to the user when asking for a name,
    /// e.g. `SwitchLinc Relay 2477S`.
    #[must_use]
    pub fn display_model(&self) -> String {
        format!("{} {}", self.model_name, self.sku)
    }
}
