//! Storage port: persistence of the device id → name mapping.

use std::future::Future;

use insteon_local_domain::device::DeviceNames;
use insteon_local_domain::error::InsteonError;

/// Persistence for user-assigned switch names.
///
/// Implementations are not expected to lock or write atomically; callers
/// run single-threaded and accept that a crash mid-write may truncate the
/// stored mapping.
pub trait DeviceNameStore: Send + Sync {
    /// Load the stored mapping. A store that has never been written to
    /// yields an empty mapping, not an error.
    fn load(&self) -> impl Future<Output = Result<DeviceNames, InsteonError>> + Send;

    /// Replace the stored mapping entirely with `names`.
    fn save(&self, names: &DeviceNames) -> impl Future<Output = Result<(), InsteonError>> + Send;
}
