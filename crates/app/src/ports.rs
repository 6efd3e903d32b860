//! Port definitions: traits that adapters and hosts implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod configurator;
pub mod hub;
pub mod sink;
pub mod storage;

pub use configurator::{ConfigField, ConfigRequest, Configurator};
pub use hub::{HubDevice, InsteonHub};
pub use sink::EntitySink;
pub use storage::DeviceNameStore;
