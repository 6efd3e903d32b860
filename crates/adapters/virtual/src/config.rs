//! Virtual hub configuration.

use serde::Deserialize;

use insteon_local_domain::device::DeviceCategory;
use insteon_local_domain::id::HubDeviceId;

/// Devices the simulated hub reports as linked.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VirtualHubConfig {
    pub devices: Vec<VirtualDeviceConfig>,
}

/// One simulated linked device.
#[derive(Debug, Clone, Deserialize)]
pub struct VirtualDeviceConfig {
    pub id: HubDeviceId,
    #[serde(default = "default_category")]
    pub category: DeviceCategory,
    #[serde(default = "default_model_name")]
    pub model_name: String,
    #[serde(default = "default_sku")]
    pub sku: String,
    /// Initial load level, `0` (off) to `255` (full on).
    #[serde(default)]
    pub level: u8,
}

impl VirtualDeviceConfig {
    /// An off `SwitchLinc Relay 2477S` with the given id.
    #[must_use]
    pub fn switch(id: HubDeviceId) -> Self {
        Self {
            id,
            category: default_category(),
            model_name: default_model_name(),
            sku: default_sku(),
            level: 0,
        }
    }
}

fn default_category() -> DeviceCategory {
    DeviceCategory::Switch
}

fn default_model_name() -> String {
    "SwitchLinc Relay".to_string()
}

fn default_sku() -> String {
    "2477S".to_string()
}
