//! The host seam.
//!
//! The host is the embedding UI: it owns the preview surface, renders
//! the omnibox, and observes mouse gestures. The controller tells it
//! when to show or hide the preview and asks it for geometry and
//! gesture state.

use std::sync::{Arc, Mutex};

use glimpse_common::{CommitKind, LoaderId, Rect, TransitionType};
use url::Url;

use crate::types::PreviewSession;

/// Implemented by the embedding UI, consumed by the controller.
pub trait HostDelegate {
    /// The loader has a renderable preview; show the overlay.
    fn show_preview(&mut self, loader: LoaderId);

    /// Hide the overlay. The preview no longer exists.
    fn hide_preview(&mut self);

    /// Current geometry for the preview overlay.
    fn preview_bounds(&self) -> Rect;

    /// Host-side veto for mouse-up commits (e.g. a drag in progress).
    fn should_commit_on_mouse_up(&self) -> bool;

    /// A controller-initiated commit: the host takes ownership of the
    /// session and places it in its own session store.
    fn commit_preview(&mut self, session: PreviewSession, kind: CommitKind);

    /// Updated autocomplete suggestion for the omnibox.
    fn set_suggested_text(&mut self, text: &str);

    /// Fall back to a normal, non-preview navigation.
    fn request_navigation(&mut self, url: Url, transition: TransitionType);

    /// Whether a mouse button is held as a result of activating the
    /// preview.
    fn is_mouse_down_from_activate(&self) -> bool;
}

/// Shared handle to the host. The controller is logically
/// single-threaded; the mutex serializes access if an embedder spreads
/// delegate calls across threads.
pub type SharedHost = Arc<Mutex<dyn HostDelegate>>;
