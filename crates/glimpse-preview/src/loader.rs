//! The loader seam.
//!
//! A `SessionLoader` owns one provisional content session and drives its
//! page load; the concrete implementation (webview-backed in the shell,
//! scripted in tests) lives outside this crate. The controller talks to
//! loaders only through this trait so alternate implementations can
//! substitute freely.

use glimpse_common::{LoaderId, PreviewError, ProviderId, Rect, TransitionType};
use url::Url;

use crate::types::{PreviewSession, SupportState};

/// One provisional content session, loading on behalf of a single
/// provider. Completion and support signals come back asynchronously
/// through the controller's delegate entry points, tagged with `id()`
/// so stale deliveries can be dropped.
pub trait SessionLoader {
    /// Generation id minted by the manager at construction.
    fn id(&self) -> LoaderId;

    /// Provider this loader was built for. Loaders are never re-targeted
    /// across providers; query refinements on the same provider reuse
    /// one loader.
    fn provider(&self) -> ProviderId;

    /// Point the provisional session at a destination. Returns the
    /// loader's autocomplete suggestion for the omnibox, if any.
    fn load_destination(
        &mut self,
        url: &Url,
        transition: TransitionType,
        user_text: &str,
        verbatim: bool,
    ) -> Option<String>;

    /// Refresh user-text/verbatim state without reloading the current
    /// destination. Returns the recomputed suggestion.
    fn refresh(&mut self, user_text: &str, verbatim: bool) -> Option<String>;

    /// Overlay geometry for the preview surface.
    fn set_bounds(&mut self, bounds: Rect);

    /// True once the session is renderable.
    fn is_ready(&self) -> bool;

    /// Whether the destination is known to support preview semantics.
    fn support(&self) -> SupportState;

    /// Destination currently loading or loaded, if any.
    fn url(&self) -> Option<&Url>;

    /// The provisional session. Loaders own one for their entire life.
    fn session(&self) -> &PreviewSession;

    /// Transfer the session out, consuming the loader shell. Used by the
    /// commit/release paths.
    fn take_session(self: Box<Self>) -> PreviewSession;
}

/// Constructs loaders on the controller's behalf. Injected at
/// construction so tests can substitute scripted loaders.
pub trait LoaderFactory {
    /// Build a loader for `provider`, tagged with the manager-minted
    /// `id`. Resource exhaustion is reported as an error; the controller
    /// treats it like an unsupported destination.
    fn create_loader(
        &mut self,
        id: LoaderId,
        provider: ProviderId,
    ) -> Result<Box<dyn SessionLoader>, PreviewError>;
}
