//! Simulated hub and device handles.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use insteon_local_app::ports::{HubDevice, InsteonHub};
use insteon_local_domain::device::LinkedDevice;
use insteon_local_domain::error::InsteonError;
use insteon_local_domain::id::HubDeviceId;
use insteon_local_domain::status::DeviceStatus;

use crate::config::VirtualHubConfig;
use crate::error::VirtualHubError;

const LEVEL_ON: u8 = 0xFF;
const LEVEL_OFF: u8 = 0x00;

struct Load {
    level: u8,
    reachable: bool,
}

struct LinkedEntry {
    info: LinkedDevice,
    load: Arc<Mutex<Load>>,
}

/// A hub whose linked devices live in memory.
pub struct VirtualHub {
    devices: HashMap<HubDeviceId, LinkedEntry>,
}

impl VirtualHub {
    #[must_use]
    pub fn new(config: VirtualHubConfig) -> Self {
        let devices = config
            .devices
            .into_iter()
            .map(|device| {
                let entry = LinkedEntry {
                    info: LinkedDevice {
                        category: device.category,
                        model_name: device.model_name,
                        sku: device.sku,
                    },
                    load: Arc::new(Mutex::new(Load {
                        level: device.level,
                        reachable: true,
                    })),
                };
                (device.id, entry)
            })
            .collect();
        Self { devices }
    }

    /// Simulate someone operating the device by hand, bypassing the hub.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualHubError::UnknownDevice`] if `device_id` is not linked.
    pub fn set_level(&self, device_id: &HubDeviceId, level: u8) -> Result<(), VirtualHubError> {
        let entry = self.entry(device_id)?;
        lock(&entry.load).level = level;
        Ok(())
    }

    /// Make a linked device stop (or resume) answering.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualHubError::UnknownDevice`] if `device_id` is not linked.
    pub fn set_reachable(
        &self,
        device_id: &HubDeviceId,
        reachable: bool,
    ) -> Result<(), VirtualHubError> {
        let entry = self.entry(device_id)?;
        lock(&entry.load).reachable = reachable;
        Ok(())
    }

    fn entry(&self, device_id: &HubDeviceId) -> Result<&LinkedEntry, VirtualHubError> {
        self.devices
            .get(device_id)
            .ok_or_else(|| VirtualHubError::UnknownDevice(device_id.clone()))
    }
}

impl InsteonHub for VirtualHub {
    type Device = VirtualDevice;

    fn linked_devices(
        &self,
    ) -> impl Future<Output = Result<HashMap<HubDeviceId, LinkedDevice>, InsteonError>> + Send
    {
        let linked: HashMap<HubDeviceId, LinkedDevice> = self
            .devices
            .iter()
            .map(|(id, entry)| (id.clone(), entry.info.clone()))
            .collect();
        tracing::debug!(count = linked.len(), "virtual hub listed linked devices");
        async { Ok(linked) }
    }

    fn device(&self, device_id: &HubDeviceId) -> VirtualDevice {
        VirtualDevice {
            device_id: device_id.clone(),
            load: self
                .devices
                .get(device_id)
                .map(|entry| Arc::clone(&entry.load)),
        }
    }
}

/// Handle to one simulated device. Handles for ids the hub does not know
/// fail every call.
#[derive(Clone)]
pub struct VirtualDevice {
    device_id: HubDeviceId,
    load: Option<Arc<Mutex<Load>>>,
}

impl VirtualDevice {
    fn with_load<T>(&self, f: impl FnOnce(&mut Load) -> T) -> Result<T, VirtualHubError> {
        let load = self
            .load
            .as_ref()
            .ok_or_else(|| VirtualHubError::UnknownDevice(self.device_id.clone()))?;
        let mut load = lock(load);
        if !load.reachable {
            return Err(VirtualHubError::Unreachable(self.device_id.clone()));
        }
        Ok(f(&mut load))
    }

    fn set(&self, level: u8) -> Result<(), InsteonError> {
        self.with_load(|load| load.level = level)?;
        tracing::debug!(device_id = %self.device_id, level, "virtual device level set");
        Ok(())
    }
}

impl HubDevice for VirtualDevice {
    fn device_id(&self) -> &HubDeviceId {
        &self.device_id
    }

    fn status(
        &self,
        _group: u8,
    ) -> impl Future<Output = Result<DeviceStatus, InsteonError>> + Send {
        let result = self
            .with_load(|load| {
                let mut status = DeviceStatus::with_level(format!("{:02X}", load.level));
                status
                    .extra
                    .insert("success".to_string(), serde_json::Value::Bool(true));
                status
            })
            .map_err(InsteonError::from);
        async { result }
    }

    fn turn_on(&self) -> impl Future<Output = Result<(), InsteonError>> + Send {
        let result = self.set(LEVEL_ON);
        async { result }
    }

    fn turn_off(&self) -> impl Future<Output = Result<(), InsteonError>> + Send {
        let result = self.set(LEVEL_OFF);
        async { result }
    }
}

fn lock(load: &Mutex<Load>) -> std::sync::MutexGuard<'_, Load> {
    load.lock().unwrap_or_else(PoisonError::into_inner)
}
