//! Pending configuration requests, keyed by device id.

use std::collections::HashMap;

use insteon_local_domain::id::HubDeviceId;

/// Devices currently waiting for the user to supply a name, with the
/// configurator handle of each outstanding prompt.
///
/// Owned by a single [`SwitchPlatform`](super::platform::SwitchPlatform);
/// lives as long as the platform does.
#[derive(Debug)]
pub struct PendingConfigurations<H> {
    requests: HashMap<HubDeviceId, H>,
}

impl<H> Default for PendingConfigurations<H> {
    fn default() -> Self {
        Self {
            requests: HashMap::new(),
        }
    }
}

impl<H> PendingConfigurations<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a prompt is outstanding for `device_id`.
    #[must_use]
    pub fn is_pending(&self, device_id: &HubDeviceId) -> bool {
        self.requests.contains_key(device_id)
    }

    /// Handle of the outstanding prompt for `device_id`, if any.
    #[must_use]
    pub fn get(&self, device_id: &HubDeviceId) -> Option<&H> {
        self.requests.get(device_id)
    }

    /// Record a new prompt. An earlier handle for the same device is
    /// replaced and returned.
    pub fn begin(&mut self, device_id: HubDeviceId, handle: H) -> Option<H> {
        self.requests.insert(device_id, handle)
    }

    /// Forget the prompt for `device_id`, returning its handle.
    pub fn complete(&mut self, device_id: &HubDeviceId) -> Option<H> {
        self.requests.remove(device_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    /// Ids with an outstanding prompt, sorted.
    #[must_use]
    pub fn pending_ids(&self) -> Vec<HubDeviceId> {
        let mut ids: Vec<HubDeviceId> = self.requests.keys().cloned().collect();
        ids.sort();
        ids
    }
}
