//! The preview session controller.
//!
//! `PreviewController` decides which provisional session exists, when it
//! is (re)created, and how ownership transfers on commit or destruction.
//! It is owned by the embedding shell, runs on its control thread, and
//! may be destroyed (`destroy_preview_contents`) or committed
//! (`commit_current_preview`) at any time; destruction hides the preview
//! through the host, commit hands the session over.

use std::time::{Duration, Instant};

use glimpse_common::{CommitKind, LoaderId, ProviderId, Rect, SessionId, TransitionType};
use glimpse_config::{PreviewConfig, PreviewMode};
use tracing::{debug, error, info, warn};
use url::Url;

use crate::blacklist::{ProviderBlacklist, SharedHostBlacklist};
use crate::condemned::DeferredDestructionQueue;
use crate::delegate::SharedHost;
use crate::loader::LoaderFactory;
use crate::manager::LoaderManager;
use crate::scheduler::{OneShotTimer, PendingUpdate, UpdateScheduler};
use crate::types::{FocusTarget, NavigationMatch, PreviewSession, SupportState};

/// Predicate deciding whether a loader-initiated commit request refers
/// to the destination the user already asked for. Receives the
/// requested and the loaded URL.
pub type SameDestinationPredicate = Box<dyn Fn(&Url, &Url) -> bool>;

fn same_destination_ignoring_fragment(requested: &Url, loaded: &Url) -> bool {
    let mut requested = requested.clone();
    requested.set_fragment(None);
    let mut loaded = loaded.clone();
    loaded.set_fragment(None);
    requested == loaded
}

/// Orchestrates the loader manager, blacklists, debounce scheduler, and
/// deferred destruction queue behind the public contract.
pub struct PreviewController {
    host: SharedHost,
    factory: Box<dyn LoaderFactory>,
    config: PreviewConfig,
    loaders: LoaderManager,
    condemned: DeferredDestructionQueue,
    scheduler: UpdateScheduler,
    auto_commit: OneShotTimer,
    provider_blacklist: ProviderBlacklist,
    host_blacklist: SharedHostBlacklist,
    same_destination: SameDestinationPredicate,
    /// The caller's committed session the current match is shown for.
    primary_session: Option<SessionId>,
    /// Destination of the last `update` call, scheduled or applied.
    last_url: Option<Url>,
    last_transition: TransitionType,
    omnibox_bounds: Rect,
    /// Has the host been told the preview is ready to show?
    is_active: bool,
    commit_on_mouse_up: bool,
    /// Session released but not yet confirmed placed by the caller.
    release_pending: Option<SessionId>,
}

impl PreviewController {
    pub fn new(
        config: PreviewConfig,
        host: SharedHost,
        factory: Box<dyn LoaderFactory>,
        host_blacklist: SharedHostBlacklist,
    ) -> Self {
        let debounce = match config.mode {
            PreviewMode::PredictiveNoDelay => Duration::ZERO,
            _ => Duration::from_millis(config.update_debounce_ms),
        };
        Self {
            host,
            factory,
            config,
            loaders: LoaderManager::new(),
            condemned: DeferredDestructionQueue::new(),
            scheduler: UpdateScheduler::new(debounce),
            auto_commit: OneShotTimer::new(),
            provider_blacklist: ProviderBlacklist::new(),
            host_blacklist,
            same_destination: Box::new(same_destination_ignoring_fragment),
            primary_session: None,
            last_url: None,
            last_transition: TransitionType::default(),
            omnibox_bounds: Rect::default(),
            is_active: false,
            commit_on_mouse_up: false,
            release_pending: None,
        }
    }

    /// Replace the same-destination predicate gating loader-initiated
    /// commits.
    pub fn set_same_destination_predicate(&mut self, predicate: SameDestinationPredicate) {
        self.same_destination = predicate;
    }

    /// Invoked as the user types, with the candidate match to preview.
    ///
    /// Destinations without a provider, with a blacklisted provider, or
    /// on a blacklisted host destroy any active preview. A destination
    /// already shown by the active loader is refreshed in place without
    /// a reload. Anything else routes through the debounce scheduler
    /// unless the active loader is warm for the same provider.
    ///
    /// Returns an autocomplete suggestion for the omnibox, if one
    /// applies immediately.
    pub fn update(
        &mut self,
        session: SessionId,
        candidate: &NavigationMatch,
        user_text: &str,
        verbatim: bool,
        now: Instant,
    ) -> Option<String> {
        self.condemned.flush();
        self.commit_on_mouse_up = false;
        self.auto_commit.cancel();
        self.primary_session = Some(session);
        self.last_transition = candidate.transition;

        if !self.config.enabled {
            self.discard_preview();
            return None;
        }

        let Some(url) = candidate.destination.as_ref() else {
            self.last_url = None;
            self.discard_preview();
            return None;
        };
        let Some(provider) = candidate.provider else {
            self.last_url = None;
            self.discard_preview();
            return None;
        };
        if self.provider_blacklist.contains(provider) {
            debug!(%provider, "destination provider is blacklisted");
            self.last_url = None;
            self.discard_preview();
            return None;
        }
        if self.is_host_blacklisted(url) {
            debug!(url = %url, "destination host is blacklisted");
            self.last_url = None;
            self.discard_preview();
            return None;
        }

        let verbatim = verbatim || self.config.mode == PreviewMode::Verbatim;
        self.last_url = Some(url.clone());

        // Same destination on the active loader: refresh text state in
        // place, no reload.
        if let Some(loader) = self.loaders.active_mut() {
            if loader.provider() == provider && loader.url() == Some(url) {
                self.scheduler.cancel();
                return loader.refresh(user_text, verbatim);
            }
        }

        let pending = PendingUpdate {
            url: url.clone(),
            provider,
            transition: candidate.transition,
            user_text: user_text.to_string(),
            verbatim,
        };

        if self.should_update_now(provider) {
            self.scheduler.cancel();
            self.apply_update(pending)
        } else {
            self.scheduler.schedule(pending, now);
            None
        }
    }

    /// Sets the omnibox bounds (screen coordinates), remembered until
    /// the preview is committed or destroyed and forwarded to the active
    /// loader.
    pub fn set_omnibox_bounds(&mut self, bounds: Rect) {
        self.condemned.flush();
        self.omnibox_bounds = bounds;
        if let Some(loader) = self.loaders.active_mut() {
            loader.set_bounds(bounds);
        }
    }

    /// Unconditionally tear down the active preview. No-op when none
    /// exists.
    pub fn destroy_preview_contents(&mut self) {
        self.condemned.flush();
        self.last_url = None;
        self.discard_preview();
    }

    /// True iff the last `update` destination is fully loaded and the
    /// destination is known to support preview.
    pub fn is_current(&self) -> bool {
        if self.scheduler.pending().is_some() {
            return false;
        }
        let Some(loader) = self.loaders.active() else {
            return false;
        };
        if !loader.is_ready() || loader.support() != SupportState::Supported {
            return false;
        }
        match (&self.last_url, loader.url()) {
            (Some(requested), Some(loaded)) => requested == loaded,
            _ => false,
        }
    }

    /// Promote the preview to primary, transferring the session to the
    /// caller. Only valid while a preview exists.
    pub fn commit_current_preview(&mut self, kind: CommitKind) -> Option<PreviewSession> {
        self.condemned.flush();
        if self.loaders.active().is_none() {
            debug_assert!(false, "commit_current_preview without an active preview");
            error!("commit_current_preview called without an active preview");
            return None;
        }
        let session = self.release_preview_contents(kind)?;
        let id = session.id.clone();
        self.complete_release(&id);
        Some(session)
    }

    /// Arm the one-shot mouse-up commit flag. Cleared by any update or
    /// destroy.
    pub fn set_commit_on_mouse_up(&mut self) {
        self.commit_on_mouse_up = true;
    }

    pub fn commit_on_mouse_up(&self) -> bool {
        self.commit_on_mouse_up
    }

    /// Whether a mouse button is held as a result of activating the
    /// preview. Pure pass-through to the host.
    pub fn is_mouse_down_from_activate(&self) -> bool {
        self.host
            .lock()
            .map(|host| host.is_mouse_down_from_activate())
            .unwrap_or(false)
    }

    /// Mouse-up gesture on the preview surface. Commits through the
    /// host exactly once when the one-shot flag is armed and the host
    /// policy agrees.
    pub fn on_preview_mouse_up(&mut self) {
        self.condemned.flush();
        if !self.commit_on_mouse_up {
            return;
        }
        self.commit_on_mouse_up = false;
        if self.loaders.active().is_none() {
            return;
        }
        let host_agrees = self
            .host
            .lock()
            .map(|host| host.should_commit_on_mouse_up())
            .unwrap_or(false);
        if host_agrees {
            self.commit_via_host(CommitKind::MouseUp);
        }
    }

    /// The initiating input control lost focus: commit when focus moved
    /// into the preview's own surface, otherwise discard.
    pub fn on_lost_focus(&mut self, target: FocusTarget) {
        self.condemned.flush();
        if self.loaders.active().is_none() {
            return;
        }
        match target {
            FocusTarget::PreviewSurface => self.commit_via_host(CommitKind::FocusLost),
            FocusTarget::Other => {
                debug!("focus left the omnibox; discarding preview");
                self.last_url = None;
                self.discard_preview();
            }
        }
    }

    /// First half of the two-phase release: transfer the session out
    /// and suspend cleanup until the caller confirms placement with
    /// [`complete_release`](Self::complete_release).
    pub fn release_preview_contents(&mut self, kind: CommitKind) -> Option<PreviewSession> {
        self.condemned.flush();
        let Some(loader) = self.loaders.release() else {
            debug_assert!(false, "release_preview_contents without an active preview");
            error!("release_preview_contents called without an active preview");
            return None;
        };
        self.scheduler.cancel();
        self.auto_commit.cancel();
        self.commit_on_mouse_up = false;
        self.is_active = false;
        self.last_url = None;
        let session = loader.take_session();
        info!(session = %session.id, ?kind, "preview released for commit");
        self.release_pending = Some(session.id.clone());
        Some(session)
    }

    /// Second half of the two-phase release: finish bookkeeping once the
    /// caller has placed the session. Calling this without a preceding
    /// release is a contract violation.
    pub fn complete_release(&mut self, session: &SessionId) {
        self.condemned.flush();
        // Violation paths must leave the pending release untouched, so
        // compare before mutating.
        match &self.release_pending {
            Some(expected) if *expected == *session => {
                self.release_pending = None;
                self.provider_blacklist.clear();
                debug!(session = %session, "release completed");
            }
            Some(expected) => {
                error!(
                    expected = %expected, got = %session,
                    "complete_release called for a session that was not released"
                );
                debug_assert!(false, "complete_release for a different session");
            }
            None => {
                error!("complete_release called without a release in progress");
                debug_assert!(false, "complete_release without a release in progress");
            }
        }
    }

    /// Fire due timers. The embedding control loop calls this; both the
    /// debounce apply and the auto-commit countdown run here.
    pub fn tick(&mut self, now: Instant) {
        self.condemned.flush();
        if let Some(pending) = self.scheduler.take_due(now) {
            let suggestion = self.apply_update(pending);
            if let Some(text) = suggestion {
                if let Ok(mut host) = self.host.lock() {
                    host.set_suggested_text(&text);
                }
            }
        }
        if self.auto_commit.fire_due(now) {
            if self.is_active && self.loaders.active().is_some() {
                info!("auto-commit countdown elapsed");
                self.commit_via_host(CommitKind::Auto);
            }
        }
    }

    // Accessors

    /// The preview session, when one exists.
    pub fn get_preview_contents(&self) -> Option<&PreviewSession> {
        self.loaders.active().map(|loader| loader.session())
    }

    /// True once the host has been told the preview is ready to show.
    /// May be false while `get_preview_contents` is non-empty.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Are preview results currently showing?
    pub fn is_showing_preview(&self) -> bool {
        matches!(self.loaders.active(), Some(loader) if loader.is_ready())
    }

    /// Transition type of the last match passed to `update`.
    pub fn last_transition_type(&self) -> TransitionType {
        self.last_transition
    }

    /// The committed session the current match is shown for.
    pub fn primary_session(&self) -> Option<&SessionId> {
        self.primary_session.as_ref()
    }

    // Delegate entry points (loader -> controller). Every entry flushes
    // the condemned queue and drops deliveries from superseded loaders.

    /// The loader has a renderable preview.
    pub fn on_loader_ready(&mut self, loader: LoaderId, now: Instant) {
        self.condemned.flush();
        if !self.loaders.is_active(loader) {
            debug!(%loader, "ignoring ready signal from stale loader");
            return;
        }
        self.is_active = true;
        if let Ok(mut host) = self.host.lock() {
            host.show_preview(loader);
        }
        self.auto_commit
            .arm(now, Duration::from_millis(self.config.auto_commit_pause_ms));
        debug!(%loader, "preview shown; auto-commit countdown armed");
    }

    /// The loader recomputed its suggested completion text.
    pub fn on_suggested_text_changed(&mut self, loader: LoaderId, text: &str) {
        self.condemned.flush();
        if !self.loaders.is_active(loader) {
            debug!(%loader, "ignoring suggestion from stale loader");
            return;
        }
        if let Ok(mut host) = self.host.lock() {
            host.set_suggested_text(text);
        }
    }

    /// The loader wants to become primary (same-page optimization).
    /// Honored only when the loaded destination matches the requested
    /// one under the configured predicate.
    pub fn on_loader_should_commit(&mut self, loader: LoaderId) {
        self.condemned.flush();
        if !self.loaders.is_active(loader) {
            debug!(%loader, "ignoring commit request from stale loader");
            return;
        }
        let same = match (&self.last_url, self.loaders.active().and_then(|l| l.url())) {
            (Some(requested), Some(loaded)) => (self.same_destination)(requested, loaded),
            _ => false,
        };
        if !same {
            debug!(%loader, "commit request for a different destination; ignored");
            return;
        }
        self.commit_via_host(CommitKind::Auto);
    }

    /// The destination does not support preview semantics: blacklist the
    /// provider, condemn the loader, and optionally fall back to a
    /// normal navigation through the host.
    pub fn on_loader_unsupported(
        &mut self,
        loader: LoaderId,
        needs_reload: bool,
        fallback: Option<Url>,
    ) {
        self.condemned.flush();
        if !self.loaders.is_active(loader) {
            debug!(%loader, "ignoring unsupported signal from stale loader");
            return;
        }
        // The loader raising this is still on the stack; condemn, never
        // drop in place.
        let Some(active) = self.loaders.release() else {
            return;
        };
        let provider = active.provider();
        self.provider_blacklist.insert(provider);
        warn!(%loader, %provider, "destination does not support preview");
        self.condemned.condemn(active);
        self.scheduler.cancel();
        self.auto_commit.cancel();
        self.commit_on_mouse_up = false;
        self.is_active = false;
        if let Ok(mut host) = self.host.lock() {
            host.hide_preview();
            if needs_reload {
                if let Some(url) = fallback {
                    info!(url = %url, "falling back to a normal navigation");
                    host.request_navigation(url, self.last_transition);
                }
            }
        }
    }

    /// Narrower blacklist signal keyed by URL host rather than provider.
    pub fn on_blacklist_requested(&mut self, loader: LoaderId, url: &Url) {
        self.condemned.flush();
        if !self.loaders.is_active(loader) {
            debug!(%loader, "ignoring blacklist request from stale loader");
            return;
        }
        if let Ok(mut blacklist) = self.host_blacklist.lock() {
            blacklist.insert_url(url);
        }
        self.last_url = None;
        self.discard_preview();
    }

    // Internals

    fn is_host_blacklisted(&self, url: &Url) -> bool {
        self.host_blacklist
            .lock()
            .map(|blacklist| blacklist.contains_url(url))
            .unwrap_or(false)
    }

    /// Immediate apply is reserved for refinements on a warm loader that
    /// already confirmed support for the same provider, and for the
    /// no-delay mode.
    fn should_update_now(&self, provider: ProviderId) -> bool {
        if self.config.mode == PreviewMode::PredictiveNoDelay || self.config.update_debounce_ms == 0
        {
            return true;
        }
        matches!(
            self.loaders.active(),
            Some(loader)
                if loader.provider() == provider
                    && loader.is_ready()
                    && loader.support() == SupportState::Supported
        )
    }

    fn apply_update(&mut self, pending: PendingUpdate) -> Option<String> {
        let bounds = self.omnibox_bounds;
        if let Err(e) = self.loaders.ensure_loader(
            pending.provider,
            self.factory.as_mut(),
            &mut self.condemned,
        ) {
            // Construction failure ends the same way an unsupported
            // destination does: no preview for this provider.
            warn!(provider = %pending.provider, "loader construction failed: {e}");
            self.provider_blacklist.insert(pending.provider);
            if self.is_active {
                self.is_active = false;
                if let Ok(mut host) = self.host.lock() {
                    host.hide_preview();
                }
            }
            return None;
        }
        let loader = self.loaders.active_mut()?;
        loader.set_bounds(bounds);
        loader.load_destination(
            &pending.url,
            pending.transition,
            &pending.user_text,
            pending.verbatim,
        )
    }

    /// Condemn the active loader, cancel both timers, clear active-state
    /// flags, and hide the preview. Shared by destroy and policy paths.
    fn discard_preview(&mut self) {
        self.scheduler.cancel();
        self.auto_commit.cancel();
        self.commit_on_mouse_up = false;
        if let Some(loader) = self.loaders.release() {
            debug!(id = %loader.id(), "discarding preview");
            self.condemned.condemn(loader);
            self.is_active = false;
            if let Ok(mut host) = self.host.lock() {
                host.hide_preview();
            }
        } else {
            self.is_active = false;
        }
    }

    /// Controller-initiated commit: hand the owned session to the host,
    /// then finish release bookkeeping.
    fn commit_via_host(&mut self, kind: CommitKind) {
        let Some(session) = self.release_preview_contents(kind) else {
            return;
        };
        let id = session.id.clone();
        if let Ok(mut host) = self.host.lock() {
            host.commit_preview(session, kind);
        }
        self.complete_release(&id);
    }
}

impl Drop for PreviewController {
    fn drop(&mut self) {
        // Timers must never fire into freed state, and condemned loaders
        // must not outlive the controller.
        self.scheduler.cancel();
        self.auto_commit.cancel();
        self.condemned.flush();
    }
}
