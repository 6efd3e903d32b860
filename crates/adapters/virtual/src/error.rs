//! Virtual hub error types.

use insteon_local_domain::error::InsteonError;
use insteon_local_domain::id::HubDeviceId;

/// Errors the simulated hub can produce.
#[derive(Debug, thiserror::Error)]
pub enum VirtualHubError {
    /// The addressed device is not linked to the hub.
    #[error("device {0} is not linked to the hub")]
    UnknownDevice(HubDeviceId),

    /// The device is linked but does not answer.
    #[error("device {0} did not respond")]
    Unreachable(HubDeviceId),
}

impl From<VirtualHubError> for InsteonError {
    fn from(err: VirtualHubError) -> Self {
        Self::Hub(Box::new(err))
    }
}
