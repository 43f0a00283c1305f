//! Deferred destruction of condemned loaders.
//!
//! Several delegate callbacks run on the stack underneath the loader's
//! own event dispatch; dropping the loader synchronously there would
//! tear down state the active call frame still relies on. Condemned
//! loaders are parked here and flushed at the start of the next public
//! entry point, before any further state transition is observable.

use tracing::debug;

use crate::loader::SessionLoader;

/// Loaders awaiting destruction. A loader enters at most once (taking
/// it out of the manager's active slot guarantees this structurally)
/// and is never reused afterwards.
#[derive(Default)]
pub struct DeferredDestructionQueue {
    condemned: Vec<Box<dyn SessionLoader>>,
}

impl DeferredDestructionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Park a loader for later destruction.
    pub fn condemn(&mut self, loader: Box<dyn SessionLoader>) {
        debug!(id = %loader.id(), "loader condemned");
        self.condemned.push(loader);
    }

    /// Destroy every condemned loader. Runs at the start of each entry
    /// point and at controller teardown; returns how many were dropped.
    pub fn flush(&mut self) -> usize {
        let count = self.condemned.len();
        if count > 0 {
            debug!(count, "flushing condemned loaders");
            self.condemned.clear();
        }
        count
    }

    pub fn len(&self) -> usize {
        self.condemned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.condemned.is_empty()
    }
}
