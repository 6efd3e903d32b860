//! In-process entity registry backed by a mutex-guarded list.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::ports::EntitySink;

/// In-process [`EntitySink`] that keeps every registered entity.
///
/// Entities are stored behind [`Arc`] so a host can poll them from
/// another task while the platform keeps registering new ones.
pub struct SwitchRegistry<E> {
    entities: Mutex<Vec<Arc<E>>>,
}

impl<E> Default for SwitchRegistry<E> {
    fn default() -> Self {
        Self {
            entities: Mutex::new(Vec::new()),
        }
    }
}

impl<E> SwitchRegistry<E> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the registered entities, in registration order.
    #[must_use]
    pub fn entities(&self) -> Vec<Arc<E>> {
        self.lock().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Arc<E>>> {
        self.entities.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<E: Send + Sync> EntitySink<E> for SwitchRegistry<E> {
    fn add_entities(&self, entities: Vec<E>) {
        let count = entities.len();
        self.lock().extend(entities.into_iter().map(Arc::new));
        tracing::debug!(count, "entities registered");
    }
}
