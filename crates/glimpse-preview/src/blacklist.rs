//! Destinations known not to support preview semantics.
//!
//! Two distinct blacklists with different keys and lifetimes:
//! - `ProviderBlacklist` is keyed by provider identity and cleared on
//!   every commit or structural destroy.
//! - `HostBlacklist` is keyed by URL host, shared across controllers
//!   (one per window), and kept for the process lifetime.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use glimpse_common::ProviderId;
use tracing::debug;
use url::Url;

/// Providers that signalled they don't support preview. Membership is
/// monotonic within a commit/reset epoch.
#[derive(Debug, Default)]
pub struct ProviderBlacklist {
    ids: HashSet<ProviderId>,
}

impl ProviderBlacklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the provider was newly added.
    pub fn insert(&mut self, provider: ProviderId) -> bool {
        let added = self.ids.insert(provider);
        if added {
            debug!(%provider, "provider blacklisted from preview");
        }
        added
    }

    pub fn contains(&self, provider: ProviderId) -> bool {
        self.ids.contains(&provider)
    }

    /// Reset at commit/destroy granularity.
    pub fn clear(&mut self) {
        if !self.ids.is_empty() {
            debug!(count = self.ids.len(), "provider blacklist cleared");
        }
        self.ids.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

/// Hosts we never preview, keyed by URL host rather than provider.
/// Consulted before creating any loader; never cleared by commits.
#[derive(Debug, Default)]
pub struct HostBlacklist {
    hosts: HashSet<String>,
}

impl HostBlacklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the URL's host. URLs without a host (e.g. data:) are ignored.
    pub fn insert_url(&mut self, url: &Url) -> bool {
        match url.host_str() {
            Some(host) => {
                let added = self.hosts.insert(host.to_string());
                if added {
                    debug!(host, "host blacklisted from preview");
                }
                added
            }
            None => false,
        }
    }

    pub fn contains_url(&self, url: &Url) -> bool {
        url.host_str()
            .map(|host| self.hosts.contains(host))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

/// Handle shared between controllers. Injected at construction so
/// multi-window sharing is explicit rather than hidden global state.
pub type SharedHostBlacklist = Arc<Mutex<HostBlacklist>>;

pub fn shared_host_blacklist() -> SharedHostBlacklist {
    Arc::new(Mutex::new(HostBlacklist::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_blacklist_insert_and_clear() {
        let mut bl = ProviderBlacklist::new();
        assert!(bl.insert(ProviderId(1)));
        assert!(!bl.insert(ProviderId(1)));
        assert!(bl.contains(ProviderId(1)));
        assert!(!bl.contains(ProviderId(2)));
        assert_eq!(bl.len(), 1);

        bl.clear();
        assert!(bl.is_empty());
        assert!(!bl.contains(ProviderId(1)));
    }

    #[test]
    fn host_blacklist_keys_by_host() {
        let mut bl = HostBlacklist::new();
        let a = Url::parse("https://search.example/q?x=1").unwrap();
        let b = Url::parse("https://search.example/other").unwrap();
        let c = Url::parse("https://elsewhere.example/").unwrap();

        assert!(bl.insert_url(&a));
        assert!(!bl.insert_url(&b));
        assert!(bl.contains_url(&a));
        assert!(bl.contains_url(&b));
        assert!(!bl.contains_url(&c));
        assert_eq!(bl.len(), 1);
    }

    #[test]
    fn host_blacklist_ignores_hostless_urls() {
        let mut bl = HostBlacklist::new();
        let data = Url::parse("data:text/plain,hello").unwrap();
        assert!(!bl.insert_url(&data));
        assert!(!bl.contains_url(&data));
        assert!(bl.is_empty());
    }

    #[test]
    fn shared_handle_is_shared() {
        let shared = shared_host_blacklist();
        let other = shared.clone();
        let url = Url::parse("https://search.example/").unwrap();
        shared.lock().unwrap().insert_url(&url);
        assert!(other.lock().unwrap().contains_url(&url));
    }
}
