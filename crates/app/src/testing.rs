//! In-memory port implementations shared by the service tests.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use insteon_local_domain::device::{DeviceCategory, DeviceNames, LinkedDevice};
use insteon_local_domain::error::InsteonError;
use insteon_local_domain::id::HubDeviceId;
use insteon_local_domain::status::DeviceStatus;

use crate::ports::{ConfigRequest, Configurator, DeviceNameStore, HubDevice, InsteonHub};

pub fn id(raw: &str) -> HubDeviceId {
    HubDeviceId::new(raw).unwrap()
}

fn hub_error(message: &str) -> InsteonError {
    InsteonError::Hub(Box::new(std::io::Error::other(message.to_string())))
}

#[derive(Default)]
pub struct FakeDeviceState {
    pub status: DeviceStatus,
    pub status_calls: usize,
    pub on_calls: usize,
    pub off_calls: usize,
    pub fail_status: bool,
    pub fail_commands: bool,
}

#[derive(Clone)]
pub struct FakeDevice {
    device_id: HubDeviceId,
    pub state: Arc<Mutex<FakeDeviceState>>,
}

impl FakeDevice {
    pub fn new(device_id: HubDeviceId) -> Self {
        Self {
            device_id,
            state: Arc::new(Mutex::new(FakeDeviceState::default())),
        }
    }

    pub fn reply_with(&self, status: DeviceStatus) {
        self.state.lock().unwrap().status = status;
    }

    pub fn status_calls(&self) -> usize {
        self.state.lock().unwrap().status_calls
    }
}

impl HubDevice for FakeDevice {
    fn device_id(&self) -> &HubDeviceId {
        &self.device_id
    }

    fn status(
        &self,
        _group: u8,
    ) -> impl Future<Output = Result<DeviceStatus, InsteonError>> + Send {
        let mut state = self.state.lock().unwrap();
        state.status_calls += 1;
        let result = if state.fail_status {
            Err(hub_error("status timed out"))
        } else {
            Ok(state.status.clone())
        };
        async { result }
    }

    fn turn_on(&self) -> impl Future<Output = Result<(), InsteonError>> + Send {
        let mut state = self.state.lock().unwrap();
        state.on_calls += 1;
        let result = if state.fail_commands {
            Err(hub_error("command rejected"))
        } else {
            Ok(())
        };
        async { result }
    }

    fn turn_off(&self) -> impl Future<Output = Result<(), InsteonError>> + Send {
        let mut state = self.state.lock().unwrap();
        state.off_calls += 1;
        let result = if state.fail_commands {
            Err(hub_error("command rejected"))
        } else {
            Ok(())
        };
        async { result }
    }
}

#[derive(Default)]
pub struct FakeHub {
    pub linked: Mutex<HashMap<HubDeviceId, LinkedDevice>>,
    pub fail_linked: bool,
    pub devices: Mutex<HashMap<HubDeviceId, FakeDevice>>,
}

impl FakeHub {
    pub fn link(&self, raw_id: &str, category: &str) {
        self.linked.lock().unwrap().insert(
            id(raw_id),
            LinkedDevice {
                category: DeviceCategory::from(category),
                model_name: "SwitchLinc Relay".to_string(),
                sku: "2477S".to_string(),
            },
        );
    }
}

impl InsteonHub for FakeHub {
    type Device = FakeDevice;

    fn linked_devices(
        &self,
    ) -> impl Future<Output = Result<HashMap<HubDeviceId, LinkedDevice>, InsteonError>> + Send
    {
        let result = if self.fail_linked {
            Err(hub_error("hub unreachable"))
        } else {
            Ok(self.linked.lock().unwrap().clone())
        };
        async { result }
    }

    fn device(&self, device_id: &HubDeviceId) -> FakeDevice {
        self.devices
            .lock()
            .unwrap()
            .entry(device_id.clone())
            .or_insert_with(|| FakeDevice::new(device_id.clone()))
            .clone()
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    pub names: Mutex<DeviceNames>,
    pub fail_load: bool,
    pub fail_save: bool,
    pub saves: Mutex<usize>,
}

impl InMemoryStore {
    pub fn with_names(entries: &[(&str, &str)]) -> Self {
        let names = entries
            .iter()
            .map(|(raw, name)| (id(raw), (*name).to_string()))
            .collect();
        Self {
            names: Mutex::new(names),
            ..Self::default()
        }
    }
}

impl DeviceNameStore for InMemoryStore {
    fn load(&self) -> impl Future<Output = Result<DeviceNames, InsteonError>> + Send {
        let result = if self.fail_load {
            Err(InsteonError::Storage(Box::new(std::io::Error::other(
                "permission denied",
            ))))
        } else {
            Ok(self.names.lock().unwrap().clone())
        };
        async { result }
    }

    fn save(&self, names: &DeviceNames) -> impl Future<Output = Result<(), InsteonError>> + Send {
        *self.saves.lock().unwrap() += 1;
        let result = if self.fail_save {
            Err(InsteonError::Storage(Box::new(std::io::Error::other(
                "disk full",
            ))))
        } else {
            *self.names.lock().unwrap() = names.clone();
            Ok(())
        };
        async { result }
    }
}

#[derive(Default)]
pub struct RecordingConfigurator {
    pub requests: Mutex<Vec<ConfigRequest>>,
    pub errors: Mutex<Vec<(usize, String)>>,
    pub done: Mutex<Vec<usize>>,
}

impl Configurator for RecordingConfigurator {
    type Handle = usize;

    fn request_config(&self, request: ConfigRequest) -> usize {
        let mut requests = self.requests.lock().unwrap();
        requests.push(request);
        requests.len() - 1
    }

    fn notify_errors(&self, handle: &usize, message: &str) {
        self.errors
            .lock()
            .unwrap()
            .push((*handle, message.to_string()));
    }

    fn request_done(&self, handle: usize) {
        self.done.lock().unwrap().push(handle);
    }
}
