//! Application services: use-case implementations.
//!
//! Each service accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod pending;
pub mod platform;
pub mod switch;
pub mod throttle;
