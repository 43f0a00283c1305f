use serde::{Deserialize, Serialize};
use std::fmt;

/// Screen-space rectangle, used for the omnibox bounds and the preview
/// overlay geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Identity of the content provider behind a candidate destination
/// (e.g. a search engine template). Blacklist key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProviderId(pub u64);

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "provider-{}", self.0)
    }
}

/// Generation id for a session loader. A fresh id is minted for every
/// loader the manager constructs; delegate callbacks carry it so stale
/// deliveries from superseded loaders can be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoaderId(pub u64);

impl fmt::Display for LoaderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "loader-{}", self.0)
    }
}

/// Navigation transition type of the match that produced a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionType {
    /// User typed the destination in the omnibox.
    Typed,
    /// Destination came from following a link.
    Link,
    /// Destination was generated from a search query.
    Generated,
}

impl Default for TransitionType {
    fn default() -> Self {
        Self::Typed
    }
}

/// What kind of gesture promoted the preview to primary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitKind {
    /// The initiating input control lost focus into the preview surface.
    FocusLost,
    /// A mouse-up gesture on the preview surface.
    MouseUp,
    /// The user pressed enter on the current match.
    PressedEnter,
    /// The auto-commit countdown elapsed.
    Auto,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_empty() {
        assert!(Rect::default().is_empty());
        assert!(Rect::new(0.0, 0.0, 100.0, 0.0).is_empty());
        assert!(!Rect::new(0.0, 0.0, 100.0, 40.0).is_empty());
    }

    #[test]
    fn provider_id_display() {
        assert_eq!(ProviderId(7).to_string(), "provider-7");
    }

    #[test]
    fn loader_id_display() {
        assert_eq!(LoaderId(3).to_string(), "loader-3");
    }

    #[test]
    fn commit_kind_serializes_snake_case() {
        let json = serde_json::to_string(&CommitKind::FocusLost).unwrap();
        assert_eq!(json, "\"focus_lost\"");
        let back: CommitKind = serde_json::from_str("\"mouse_up\"").unwrap();
        assert_eq!(back, CommitKind::MouseUp);
    }

    #[test]
    fn transition_type_default_is_typed() {
        assert_eq!(TransitionType::default(), TransitionType::Typed);
    }
}
