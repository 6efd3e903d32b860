//! # insteon-local-domain
//!
//! Pure domain model for the Insteon local-hub switch integration.
//!
//! ## Responsibilities
//! - Foundational types: hub device addresses, error conventions
//! - Describe **linked devices** as reported by the hub during discovery
//! - Describe **status replies** and how a level maps to on/off
//! - Define **switch state** and the read-only snapshot exposed to hosts
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;

pub mod device;
pub mod entity;
pub mod status;
