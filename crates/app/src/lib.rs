//! # insteon-local-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters and hosts must implement:
//!   - `InsteonHub` / `HubDevice`: discovery and per-device commands
//!   - `DeviceNameStore`: load & save the device id → name mapping
//!   - `Configurator`: ask the user for input and report back
//!   - `EntitySink`: hand newly created switches to the host
//! - Provide the **use-cases**:
//!   - `SwitchPlatform`: restore named switches, discover new ones and
//!     drive the one-time naming flow
//!   - `InsteonSwitch`: throttled, optimistic on/off entity
//! - Provide **in-process infrastructure** (switch registry) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `insteon-local-domain` only (plus `tokio::time` for throttling).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod registry;
pub mod services;

#[cfg(test)]
mod testing;
