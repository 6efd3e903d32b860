//! [`DeviceNameStore`] implementation backed by a JSON file.

use std::collections::BTreeMap;
use std::future::Future;
use std::path::{Path, PathBuf};

use insteon_local_app::ports::DeviceNameStore;
use insteon_local_domain::device::DeviceNames;
use insteon_local_domain::error::InsteonError;
use insteon_local_domain::id::HubDeviceId;

use crate::error::StorageError;

/// File name used inside the host configuration directory.
pub const DEFAULT_FILE_NAME: &str = "insteon_local_switch.conf";

/// Device name store reading and writing one JSON object file.
///
/// Keys are kept verbatim. Entries with a blank key are skipped on load
/// and therefore dropped by the next save.
///
/// Not safe for concurrent writers: two overlapping saves may interleave.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at [`DEFAULT_FILE_NAME`] inside `config_dir`.
    pub fn in_config_dir(config_dir: impl AsRef<Path>) -> Self {
        Self::new(config_dir.as_ref().join(DEFAULT_FILE_NAME))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<DeviceNames, StorageError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no configuration file yet");
                return Ok(DeviceNames::new());
            }
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        let raw: BTreeMap<String, String> =
            serde_json::from_str(&content).map_err(|source| StorageError::Json {
                path: self.path.clone(),
                source,
            })?;
        Ok(raw
            .into_iter()
            .filter_map(|(key, name)| match HubDeviceId::new(key) {
                Ok(device_id) => Some((device_id, name)),
                Err(err) => {
                    tracing::warn!(path = %self.path.display(), error = %err, "skipping entry");
                    None
                }
            })
            .collect())
    }

    async fn write(&self, names: &DeviceNames) -> Result<(), StorageError> {
        let content = serde_json::to_string(names).map_err(|source| StorageError::Json {
            path: self.path.clone(),
            source,
        })?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|source| StorageError::Io {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(path = %self.path.display(), count = names.len(), "configuration saved");
        Ok(())
    }
}

impl DeviceNameStore for JsonFileStore {
    fn load(&self) -> impl Future<Output = Result<DeviceNames, InsteonError>> + Send {
        async move { self.read().await.map_err(InsteonError::from) }
    }

    fn save(&self, names: &DeviceNames) -> impl Future<Output = Result<(), InsteonError>> + Send {
        async move { self.write(names).await.map_err(InsteonError::from) }
    }
}
