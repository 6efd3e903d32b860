//! # insteon-local-adapter-virtual
//!
//! Virtual/demo hub that simulates an Insteon local hub for testing and
//! demonstration purposes.
//!
//! ## Behaviour
//!
//! | Call | Result |
//! |------|--------|
//! | `linked_devices` | Every configured device with its category, model and SKU |
//! | `status(group)` | `{"cmd2": "<level as two hex digits>", "success": true}` |
//! | `turn_on` / `turn_off` | Sets the level to `FF` / `00` |
//!
//! Addressing a device that is not configured yields a hub error.
//!
//! ## Dependency rule
//!
//! Depends on `insteon-local-app` (port traits) and `insteon-local-domain` only.

mod config;
mod error;
mod hub;

pub use config::{VirtualDeviceConfig, VirtualHubConfig};
pub use error::VirtualHubError;
pub use hub::{VirtualDevice, VirtualHub};
