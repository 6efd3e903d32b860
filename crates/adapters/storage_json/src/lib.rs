//! # insteon-local-adapter-storage-json
//!
//! Persists the device id → name mapping as a single JSON object on disk.
//!
//! ## Responsibilities
//! - Implement the `DeviceNameStore` port defined in `insteon-local-app::ports::storage`
//! - Treat a missing file as an empty mapping
//! - Overwrite the whole file on every save (no merge, no atomic rename)
//!
//! ## Dependency rule
//! Depends on `insteon-local-app` (for port traits) and `insteon-local-domain`
//! (for domain types). The `app` and `domain` crates must never reference
//! this adapter.

mod error;
mod store;

pub use error::StorageError;
pub use store::{DEFAULT_FILE_NAME, JsonFileStore};
