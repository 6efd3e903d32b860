//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`InsteonError`] via `From` when crossing a port boundary.

use std::error::Error as StdError;

/// Boxed source error carried across port boundaries.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Top-level error for the integration.
#[derive(Debug, thiserror::Error)]
pub enum InsteonError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A lookup found nothing.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// Talking to the hub failed.
    #[error("hub communication error")]
    Hub(#[source] BoxError),

    /// Reading or writing persisted configuration failed.
    #[error("storage error")]
    Storage(#[source] BoxError),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A hub device id was empty.
    #[error("device id must not be empty")]
    EmptyDeviceId,

    /// A user-supplied name was empty.
    #[error("name must not be empty")]
    EmptyName,

    /// The hub reported a level that is not a hexadecimal integer.
    #[error("invalid level {0:?}, expected a hexadecimal integer")]
    InvalidLevel(String),
}

/// Something was looked up by id and does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// Kind of thing that was looked up (e.g. `"PendingConfiguration"`).
    pub entity: &'static str,
    /// The id that was looked up.
    pub id: String,
}
