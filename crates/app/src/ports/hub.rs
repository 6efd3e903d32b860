//! Hub port: discovery and per-device commands on the local hub.
//!
//! The hub client itself lives outside this workspace; anything that can
//! list linked devices and address one of them by id fits here.

use std::collections::HashMap;
use std::future::Future;

use insteon_local_domain::device::LinkedDevice;
use insteon_local_domain::error::InsteonError;
use insteon_local_domain::id::HubDeviceId;
use insteon_local_domain::status::DeviceStatus;

/// Handle to one device behind the hub.
pub trait HubDevice: Send + Sync {
    /// The id the hub knows this device by.
    fn device_id(&self) -> &HubDeviceId;

    /// Query the device status for the given group (`0` for the main load).
    fn status(&self, group: u8) -> impl Future<Output = Result<DeviceStatus, InsteonError>> + Send;

    /// Switch the load on.
    fn turn_on(&self) -> impl Future<Output = Result<(), InsteonError>> + Send;

    /// Switch the load off.
    fn turn_off(&self) -> impl Future<Output = Result<(), InsteonError>> + Send;
}

/// A local hub that knows which devices are linked to it.
pub trait InsteonHub: Send + Sync {
    /// Device handle type produced by [`device`](Self::device).
    type Device: HubDevice + 'static;

    /// Every device the hub reports as linked, keyed by id.
    fn linked_devices(
        &self,
    ) -> impl Future<Output = Result<HashMap<HubDeviceId, LinkedDevice>, InsteonError>> + Send;

    /// Build a handle for the device with the given id. No IO happens here.
    fn device(&self, device_id: &HubDeviceId) -> Self::Device;
}
