//! Value types crossing the controller's boundaries.

use glimpse_common::{ProviderId, Rect, SessionId, TransitionType};
use serde::{Deserialize, Serialize};
use url::Url;

/// Whether a loader's destination is known to support preview semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupportState {
    /// The loader has not yet heard back from the destination.
    Determining,
    /// The destination participates in preview.
    Supported,
    /// The destination opted out; the provider gets blacklisted.
    Unsupported,
}

impl Default for SupportState {
    fn default() -> Self {
        Self::Determining
    }
}

/// The provisional content session owned by a loader.
///
/// At most one exists across the controller at any time. Ownership moves
/// out through the commit/release protocol; after that the controller
/// holds no preview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewSession {
    pub id: SessionId,
    pub url: Url,
    pub transition: TransitionType,
    pub user_text: String,
    pub verbatim: bool,
    /// Overlay geometry last pushed by the controller.
    pub bounds: Rect,
}

impl PreviewSession {
    /// A fresh session pointed at the blank page. Loaders own one of
    /// these for their entire life; the first destination load fills in
    /// the real URL.
    pub fn blank() -> Self {
        Self {
            id: SessionId::new(),
            // The parser accepts about:blank unconditionally.
            url: Url::parse("about:blank").expect("about:blank is a valid URL"),
            transition: TransitionType::default(),
            user_text: String::new(),
            verbatim: false,
            bounds: Rect::default(),
        }
    }
}

/// A candidate navigation produced by the omnibox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationMatch {
    /// Where the match navigates; `None` means the omnibox is empty.
    pub destination: Option<Url>,
    /// Provider behind the destination; `None` means no preview applies.
    pub provider: Option<ProviderId>,
    pub transition: TransitionType,
}

impl NavigationMatch {
    pub fn new(destination: Url, provider: ProviderId, transition: TransitionType) -> Self {
        Self {
            destination: Some(destination),
            provider: Some(provider),
            transition,
        }
    }

    /// An empty-omnibox match: no destination, no provider.
    pub fn empty() -> Self {
        Self {
            destination: None,
            provider: None,
            transition: TransitionType::default(),
        }
    }
}

/// Where focus went when the initiating input control lost it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// Focus moved into the preview's own surface.
    PreviewSurface,
    /// Focus moved anywhere else.
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_session_points_at_about_blank() {
        let session = PreviewSession::blank();
        assert_eq!(session.url.as_str(), "about:blank");
        assert!(session.user_text.is_empty());
        assert!(!session.verbatim);
    }

    #[test]
    fn blank_sessions_have_distinct_ids() {
        assert_ne!(PreviewSession::blank().id, PreviewSession::blank().id);
    }

    #[test]
    fn empty_match_has_no_destination() {
        let m = NavigationMatch::empty();
        assert!(m.destination.is_none());
        assert!(m.provider.is_none());
    }

    #[test]
    fn support_state_defaults_to_determining() {
        assert_eq!(SupportState::default(), SupportState::Determining);
    }
}
