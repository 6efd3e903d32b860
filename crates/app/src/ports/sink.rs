//! Entity sink port: where newly created switches are handed to the host.

/// Receives entities created by the platform.
///
/// The host owns the entities from then on (polling, service calls,
/// teardown). There is no removal path.
pub trait EntitySink<E>: Send + Sync {
    /// Register a batch of entities.
    fn add_entities(&self, entities: Vec<E>);
}
