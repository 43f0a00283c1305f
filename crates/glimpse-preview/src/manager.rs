//! Loader ownership and replacement.

use glimpse_common::{LoaderId, PreviewError, ProviderId};
use tracing::debug;

use crate::condemned::DeferredDestructionQueue;
use crate::loader::{LoaderFactory, SessionLoader};

/// Owns zero-or-one active `SessionLoader` and mints loader ids.
///
/// Equivalence is provider-identity-based, not URL-based, so query
/// refinements on the same engine reuse one loader.
#[derive(Default)]
pub struct LoaderManager {
    active: Option<Box<dyn SessionLoader>>,
    next_loader: u64,
}

impl LoaderManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<&dyn SessionLoader> {
        self.active.as_deref()
    }

    pub fn active_mut(&mut self) -> Option<&mut (dyn SessionLoader + 'static)> {
        self.active.as_deref_mut()
    }

    pub fn active_id(&self) -> Option<LoaderId> {
        self.active.as_ref().map(|loader| loader.id())
    }

    /// Identity check used by every delegate entry point.
    pub fn is_active(&self, id: LoaderId) -> bool {
        self.active_id() == Some(id)
    }

    /// Make the active loader target `provider`, reusing it when its
    /// provider already matches, otherwise condemning it and
    /// constructing a replacement through `factory`. On success the
    /// active slot holds the loader; on error it holds none.
    pub fn ensure_loader(
        &mut self,
        provider: ProviderId,
        factory: &mut dyn LoaderFactory,
        condemned: &mut DeferredDestructionQueue,
    ) -> Result<(), PreviewError> {
        let reuse = matches!(&self.active, Some(loader) if loader.provider() == provider);
        if !reuse {
            if let Some(old) = self.active.take() {
                condemned.condemn(old);
            }
            let id = LoaderId(self.next_loader);
            self.next_loader += 1;
            let loader = factory.create_loader(id, provider)?;
            debug!(%id, %provider, "session loader constructed");
            self.active = Some(loader);
        }
        Ok(())
    }

    /// Transfer ownership of the active loader out; afterwards the
    /// manager holds none. Used by the commit/release and condemnation
    /// paths.
    pub fn release(&mut self) -> Option<Box<dyn SessionLoader>> {
        self.active.take()
    }
}
